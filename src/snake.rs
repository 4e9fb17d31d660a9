use std::collections::VecDeque;

use crate::error::Result;
use crate::grid::Position;
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Up | Down)
    }
}

/// The player's snake: a head plus the trailing segments, nearest first.
#[derive(Debug, Clone)]
pub struct Snake {
    head: Position,
    body: VecDeque<Position>,
    heading: Option<Direction>,
    score: u32,
    moves: u32,
}

impl Snake {
    /// A head-only snake standing still at `head`.
    pub fn new(head: Position) -> Self {
        Snake { head, body: VecDeque::new(), heading: None, score: 0, moves: 0 }
    }

    pub fn head(&self) -> Position {
        self.head
    }

    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn heading(&self) -> Option<Direction> {
        self.heading
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.head == pos || self.body.contains(&pos)
    }

    /// Requests a new heading. Returns `true` if the heading actually changed,
    /// which is what the move counter tracks.
    ///
    /// Turning straight back is refused once there is a segment behind the head.
    pub fn steer(&mut self, new_heading: Direction) -> bool {
        match self.heading {
            Some(current) if current == new_heading => false,
            Some(current) if current.is_opposite(new_heading) && !self.body.is_empty() => false,
            _ => {
                self.heading = Some(new_heading);
                self.moves += 1;
                true
            }
        }
    }

    /// Moves one cell along the current heading, dragging the body behind.
    /// A snake with no heading yet stays put.
    pub fn advance(&mut self) {
        let dir = match self.heading {
            Some(dir) => dir,
            None => return,
        };

        if !self.body.is_empty() {
            self.body.pop_back();
            self.body.push_front(self.head);
        }

        self.head = self.head.step(dir);
    }

    /// Adds one segment on top of the current tail (or the head, for a
    /// head-only snake); the next `advance` pulls it into place.
    pub fn grow(&mut self) -> Result<()> {
        self.body.try_reserve(1)?;
        let tail = self.body.back().copied().unwrap_or(self.head);
        self.body.push_back(tail);
        Ok(())
    }

    /// Scores one food and grows by one segment.
    pub fn feed(&mut self) -> Result<()> {
        self.score += 1;
        self.grow()
    }
}
