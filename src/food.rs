use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::grid::{Bounds, Position};
use crate::snake::Snake;

/// Random draws tried before falling back to picking among the free cells.
const MAX_REJECTIONS: usize = 1024;

/// Places food on free cells. Owns the game's only random source, seeded once.
pub struct FoodSpawner<R = StdRng> {
    rng: R,
}

impl FoodSpawner<StdRng> {
    /// Seeds from `seed` when given, otherwise from OS entropy.
    pub fn seeded(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        FoodSpawner::new(rng)
    }
}

impl<R: Rng> FoodSpawner<R> {
    pub fn new(rng: R) -> Self {
        FoodSpawner { rng }
    }

    /// Picks a uniformly random interior cell not covered by `snake`.
    /// Returns `None` only when the snake fills the whole board.
    pub fn spawn(&mut self, snake: &Snake, bounds: Bounds) -> Option<Position> {
        // Food is placed at most once per move, so the body holds at most one
        // duplicated tail cell and covers at least `len` distinct cells with the head.
        if snake.body().len() >= bounds.area() {
            debug!(area = bounds.area(), "no room left for food");
            return None;
        }

        for attempt in 0..MAX_REJECTIONS {
            let candidate = Position::new(
                self.rng.gen_range(1..=bounds.width),
                self.rng.gen_range(1..=bounds.height),
            );

            debug_assert!(bounds.contains(candidate));
            if !snake.occupies(candidate) {
                trace!(%candidate, rejected = attempt, "food placed");
                return Some(candidate);
            }
        }

        debug!(limit = MAX_REJECTIONS, "rejection sampling gave up, scanning free cells");
        let free: Vec<Position> = bounds.cells().filter(|pos| !snake.occupies(*pos)).collect();
        free.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::*;

    fn spawner(seed: u64) -> FoodSpawner {
        FoodSpawner::seeded(Some(seed))
    }

    /// A snake laid out left to right along row 1 of `bounds`, `len` cells long.
    fn long_snake(len: usize) -> Snake {
        let mut snake = Snake::new(Position::new(1, 1));
        snake.steer(Right);
        for _ in 1..len {
            snake.feed().unwrap();
            snake.advance();
        }
        snake
    }

    #[test]
    fn food_is_inside_and_off_the_snake() {
        let bounds = Bounds::default();
        let snake = long_snake(30);
        let mut spawner = spawner(7);

        for _ in 0..2000 {
            let food = spawner.spawn(&snake, bounds).unwrap();
            assert!(bounds.contains(food));
            assert!(!snake.occupies(food));
        }
    }

    #[test]
    fn same_seed_same_food() {
        let bounds = Bounds::default();
        let snake = Snake::new(bounds.center());
        let a: Vec<_> = (0..20).scan(spawner(42), |s, _| s.spawn(&snake, bounds)).collect();
        let b: Vec<_> = (0..20).scan(spawner(42), |s, _| s.spawn(&snake, bounds)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn last_free_cell_is_found() {
        // Row of 6 with the snake covering the first 5 cells.
        let bounds = Bounds::new(6, 1);
        let snake = long_snake(5);
        let mut spawner = spawner(3);

        for _ in 0..10 {
            assert_eq!(spawner.spawn(&snake, bounds), Some(Position::new(6, 1)));
        }
    }

    #[test]
    fn just_grown_snake_still_leaves_room() {
        // 2x1 board, head on (1,1) having just eaten: the body is the head's
        // duplicate, so (2,1) is still free.
        let bounds = Bounds::new(2, 1);
        let mut snake = Snake::new(Position::new(1, 1));
        snake.feed().unwrap();
        assert_eq!(spawner(9).spawn(&snake, bounds), Some(Position::new(2, 1)));
    }

    #[test]
    fn full_board_yields_nothing() {
        let bounds = Bounds::new(4, 1);
        let snake = long_snake(4);
        assert_eq!(spawner(1).spawn(&snake, bounds), None);
    }
}
