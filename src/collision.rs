//! Wall and self collision tests, run once per tick right after the snake moves.

use std::collections::VecDeque;

use crate::grid::{Bounds, Position};
use crate::snake::Snake;

pub fn hits_wall(head: Position, bounds: Bounds) -> bool {
    head.x == 0 || head.x == bounds.width + 1 || head.y == 0 || head.y == bounds.height + 1
}

pub fn hits_self(head: Position, body: &VecDeque<Position>) -> bool {
    body.contains(&head)
}

pub fn is_alive(snake: &Snake, bounds: Bounds) -> bool {
    !(hits_wall(snake.head(), bounds) || hits_self(snake.head(), snake.body()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::*;

    #[test]
    fn border_ring_is_a_wall() {
        let bounds = Bounds::new(51, 21);
        for head in [Position::new(0, 5), Position::new(52, 5), Position::new(10, 0), Position::new(10, 22)] {
            assert!(hits_wall(head, bounds), "{} should hit the wall", head);
        }
        for head in [Position::new(1, 1), Position::new(51, 21), Position::new(26, 11)] {
            assert!(!hits_wall(head, bounds), "{} is inside", head);
        }
    }

    #[test]
    fn head_on_body_is_self_hit() {
        let body: VecDeque<Position> = vec![Position::new(3, 3), Position::new(3, 4)].into();
        assert!(hits_self(Position::new(3, 4), &body));
        assert!(!hits_self(Position::new(4, 4), &body));
        assert!(!hits_self(Position::new(4, 4), &VecDeque::new()));
    }

    #[test]
    fn snake_curling_into_itself_dies() {
        let bounds = Bounds::default();
        let mut snake = Snake::new(Position::new(10, 10));
        snake.steer(Right);
        for _ in 0..4 {
            snake.feed().unwrap();
            snake.advance();
            assert!(is_alive(&snake, bounds));
        }

        for dir in [Down, Left] {
            snake.steer(dir);
            snake.advance();
            assert!(is_alive(&snake, bounds));
        }
        snake.steer(Up);
        snake.advance();
        assert!(!is_alive(&snake, bounds));
    }

    /// Head at (7,6), body (8,6), (8,5), (7,5): the tail sits right above the head.
    fn hooked_snake() -> Snake {
        let mut snake = Snake::new(Position::new(7, 5));
        for dir in [Right, Down, Left] {
            snake.feed().unwrap();
            snake.steer(dir);
            snake.advance();
        }
        assert_eq!(snake.head(), Position::new(7, 6));
        assert_eq!(
            snake.body().iter().copied().collect::<Vec<_>>(),
            vec![Position::new(8, 6), Position::new(8, 5), Position::new(7, 5)]
        );
        snake
    }

    #[test]
    fn chasing_the_tail_is_safe() {
        let bounds = Bounds::default();
        let mut snake = hooked_snake();
        snake.steer(Up);
        snake.advance();
        assert_eq!(snake.head(), Position::new(7, 5));
        assert!(is_alive(&snake, bounds));
    }

    #[test]
    fn chasing_the_tail_right_after_growing_dies() {
        let bounds = Bounds::default();
        let mut snake = hooked_snake();
        snake.feed().unwrap();
        snake.steer(Up);
        snake.advance();
        assert_eq!(snake.head(), Position::new(7, 5));
        assert!(hits_self(snake.head(), snake.body()));
        assert!(!is_alive(&snake, bounds));
    }

    #[test]
    fn walking_off_the_edge_dies() {
        let bounds = Bounds::new(5, 5);
        let mut snake = Snake::new(Position::new(5, 3));
        snake.steer(Right);
        assert!(is_alive(&snake, bounds));
        snake.advance();
        assert!(!is_alive(&snake, bounds));
    }
}
