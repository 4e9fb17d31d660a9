use std::collections::VecDeque;
use std::io;
use std::thread::sleep;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info};

use crate::collision;
use crate::error::Result;
use crate::food::FoodSpawner;
use crate::grid::{Bounds, GridInt, Position};
use crate::snake::{Direction, Snake};
use crate::speed::{Difficulty, SpeedController};

/// How long the final frame stays up after a crash.
const CRASH_PAUSE: Duration = Duration::from_millis(500);
/// Input polling interval while paused.
const PAUSE_POLL: Duration = Duration::from_millis(50);

/// Draws frames. Nothing drawn ever feeds back into the game.
pub trait Renderer {
    fn clear_frame(&mut self) -> io::Result<()>;
    fn draw_border(&mut self, bounds: Bounds) -> io::Result<()>;
    fn draw_snake(&mut self, head: Position, body: &VecDeque<Position>) -> io::Result<()>;
    fn draw_food(&mut self, food: Position) -> io::Result<()>;
    fn draw_stats(&mut self, score: u32, moves: u32, offset: (GridInt, GridInt)) -> io::Result<()>;
    fn draw_message(&mut self, lines: &[&str]) -> io::Result<()>;
    fn present_frame(&mut self) -> io::Result<()>;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    TogglePause,
    Quit,
}

/// Non-blocking input used while playing.
pub trait InputSource {
    /// Every command received since the last call, oldest first. Never waits.
    fn poll_commands(&mut self) -> io::Result<Vec<Command>>;
}

/// Where the game stands between ticks. `Alive` is the resting state; a tick
/// either leaves it there or moves it to one of the terminal states.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Alive,
    Collided,
    /// The snake filled the board, there is nowhere left to put food.
    Won,
}

impl Phase {
    pub fn is_over(self) -> bool {
        matches!(self, Phase::Collided | Phase::Won)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub score: u32,
    pub moves: u32,
    pub won: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still alive; wait this long before the next tick.
    Continue(Duration),
    Over(GameSummary),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RunEnd {
    Finished(GameSummary),
    Quit,
}

pub struct Game<R = StdRng> {
    bounds: Bounds,
    snake: Snake,
    food: Option<Position>,
    speed: SpeedController,
    spawner: FoodSpawner<R>,
    phase: Phase,
}

impl<R: Rng> Game<R> {
    pub fn new(difficulty: Difficulty, bounds: Bounds, mut spawner: FoodSpawner<R>) -> Self {
        let snake = Snake::new(bounds.center());
        let food = spawner.spawn(&snake, bounds);
        let phase = if food.is_some() { Phase::Alive } else { Phase::Won };
        info!(%difficulty, start = %snake.head(), "new game");

        Game { bounds, snake, food, speed: SpeedController::new(difficulty), spawner, phase }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn speed(&self) -> &SpeedController {
        &self.speed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            score: self.snake.score(),
            moves: self.snake.moves(),
            won: self.phase == Phase::Won,
        }
    }

    /// Runs one tick with the latest direction key, if any.
    pub fn tick(&mut self, input: Option<Direction>) -> Result<TickOutcome> {
        if self.phase.is_over() {
            return Ok(TickOutcome::Over(self.summary()));
        }

        if let Some(dir) = input {
            if self.snake.steer(dir) {
                debug!(?dir, moves = self.snake.moves(), "heading changed");
            }
        }

        self.snake.advance();

        if !collision::is_alive(&self.snake, self.bounds) {
            self.phase = Phase::Collided;
            info!(head = %self.snake.head(), score = self.snake.score(), moves = self.snake.moves(), "collision");
            return Ok(TickOutcome::Over(self.summary()));
        }

        if self.food == Some(self.snake.head()) {
            self.snake.feed()?;
            self.speed.on_food_eaten();
            self.food = self.spawner.spawn(&self.snake, self.bounds);
            debug!(score = self.snake.score(), delay_ms = self.speed.base_delay_ms(), food = ?self.food, "food eaten");

            if self.food.is_none() {
                self.phase = Phase::Won;
                info!(score = self.snake.score(), "board filled");
                return Ok(TickOutcome::Over(self.summary()));
            }
        }

        Ok(TickOutcome::Continue(self.speed.delay_for(self.snake.heading())))
    }

    pub fn render<T: Renderer>(&self, out: &mut T) -> io::Result<()> {
        out.clear_frame()?;
        out.draw_border(self.bounds)?;
        out.draw_snake(self.snake.head(), self.snake.body())?;
        if let Some(food) = self.food() {
            out.draw_food(food)?;
        }
        out.draw_stats(self.snake.score(), self.snake.moves(), self.bounds.relative_to_center(self.snake.head()))?;
        out.present_frame()
    }
}

/// Plays `game` to the end on `term`, sleeping between ticks.
pub fn run<R, T>(game: &mut Game<R>, term: &mut T) -> Result<RunEnd>
where
    R: Rng,
    T: Renderer + InputSource,
{
    run_with(game, term, sleep)
}

/// Like [`run`], with the wait between ticks supplied by the caller.
pub fn run_with<R, T, S>(game: &mut Game<R>, term: &mut T, mut wait: S) -> Result<RunEnd>
where
    R: Rng,
    T: Renderer + InputSource,
    S: FnMut(Duration),
{
    let mut paused = false;
    game.render(term)?;

    loop {
        let mut steer = None;
        for command in term.poll_commands()? {
            match command {
                Command::Steer(dir) => steer = Some(dir),
                Command::TogglePause => {
                    paused = !paused;
                    debug!(paused, "pause toggled");
                    game.render(term)?;
                    if paused {
                        term.draw_message(&["Paused", "Press Esc to resume", "or CTRL+C to quit"])?;
                        term.present_frame()?;
                    }
                }
                Command::Quit => {
                    info!("quit during play");
                    return Ok(RunEnd::Quit);
                }
            }
        }

        if paused {
            wait(PAUSE_POLL);
            continue;
        }

        let outcome = game.tick(steer)?;
        game.render(term)?;

        match outcome {
            TickOutcome::Continue(delay) => wait(delay),
            TickOutcome::Over(summary) => {
                info!(phase = ?game.phase(), length = game.snake().body().len() + 1, final_delay_ms = game.speed().base_delay_ms(), "game finished");
                wait(CRASH_PAUSE);
                return Ok(RunEnd::Finished(summary));
            }
        }
    }
}
