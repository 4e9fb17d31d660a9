//! Fixed playing-field geometry.

use std::fmt;

use crate::snake::Direction;

pub type GridInt = i16;

/// Interior width of the board, in cells.
pub const GRID_WIDTH: GridInt = 51;
/// Interior height of the board, in cells.
pub const GRID_HEIGHT: GridInt = 21;

/// A cell on the board. The interior is 1-indexed; row/column 0 and
/// `width + 1`/`height + 1` form the border ring.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: GridInt,
    pub y: GridInt,
}

impl Position {
    pub const fn new(x: GridInt, y: GridInt) -> Self {
        Position { x, y }
    }

    /// The neighbouring cell one step in `dir`.
    pub fn step(self, dir: Direction) -> Self {
        match dir {
            Direction::Up => Position::new(self.x, self.y - 1),
            Direction::Down => Position::new(self.x, self.y + 1),
            Direction::Left => Position::new(self.x - 1, self.y),
            Direction::Right => Position::new(self.x + 1, self.y),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Bounds {
    pub width: GridInt,
    pub height: GridInt,
}

impl Bounds {
    pub const fn new(width: GridInt, height: GridInt) -> Self {
        Bounds { width, height }
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2 + 1, self.height / 2 + 1)
    }

    pub fn contains(&self, pos: Position) -> bool {
        (1..=self.width).contains(&pos.x) && (1..=self.height).contains(&pos.y)
    }

    /// Number of interior cells.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Offset of `pos` from the center, with y growing upwards.
    pub fn relative_to_center(&self, pos: Position) -> (GridInt, GridInt) {
        let center = self.center();
        (pos.x - center.x, center.y - pos.y)
    }

    /// Every interior cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (1..=self.height).flat_map(move |y| (1..=self.width).map(move |x| Position::new(x, y)))
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::new(GRID_WIDTH, GRID_HEIGHT)
    }
}
