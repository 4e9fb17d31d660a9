mod collision;
mod error;
mod food;
mod game;
mod grid;
mod menu;
mod snake;
mod speed;
mod term;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::food::FoodSpawner;
use crate::game::{Game, GameSummary, RunEnd};
use crate::grid::Bounds;
use crate::speed::Difficulty;
use crate::term::TermManager;

/// Terminal snake: eat the food, grow, and stay off the walls and yourself
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Start right away at this difficulty instead of showing the menu
    #[arg(short, long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Seed for food placement, for repeatable games
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (level taken from RUST_LOG, default debug)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// What the player is looking at.
enum Screen {
    Menu,
    Playing(Difficulty),
    Report(GameSummary),
    Exit,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let mut term = TermManager::new().context("cannot start the game")?;
    term.setup().context("failed to prepare the terminal")?;

    // Restore first so any error is printed to a usable shell.
    let result = play(&mut term, &args);
    let restored = term.restore().context("failed to restore the terminal");
    info!(ok = result.is_ok(), restored = restored.is_ok(), "exit");
    first_failure(result, restored)
}

/// The game's own error outranks a failure to restore the terminal.
fn first_failure(played: Result<()>, restored: Result<()>) -> Result<()> {
    if let (Err(_), Err(e)) = (&played, &restored) {
        warn!(error = %e, "terminal restore also failed");
    }
    played.and(restored)
}

fn play(term: &mut TermManager, args: &Args) -> Result<()> {
    let mut screen = match args.difficulty {
        Some(difficulty) => Screen::Playing(difficulty),
        None => Screen::Menu,
    };

    loop {
        screen = match screen {
            Screen::Menu => match menu::choose_difficulty(term)? {
                Some(difficulty) => Screen::Playing(difficulty),
                None => Screen::Exit,
            },
            Screen::Playing(difficulty) => {
                let spawner = FoodSpawner::seeded(args.seed);
                let mut game = Game::new(difficulty, Bounds::default(), spawner);
                match game::run(&mut game, term)? {
                    RunEnd::Finished(summary) => Screen::Report(summary),
                    RunEnd::Quit => Screen::Exit,
                }
            }
            Screen::Report(summary) => {
                menu::report(term, &summary)?;
                Screen::Exit
            }
            Screen::Exit => return Ok(()),
        };
    }
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => return Ok(()),
    };

    let file = File::create(path).with_context(|| format!("failed to open log file {:?}", path))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "snake=debug".into()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;

    #[test]
    fn game_error_survives_a_failed_restore() {
        let grow = Vec::<u8>::new().try_reserve(usize::MAX).unwrap_err();
        let played: Result<()> = Err(GameError::from(grow).into());
        let restored: Result<()> = Err(anyhow::anyhow!("restore failed"));

        let err = first_failure(played, restored).unwrap_err();
        assert!(err.downcast_ref::<GameError>().is_some());
    }

    #[test]
    fn restore_failure_is_reported_after_a_clean_game() {
        let err = first_failure(Ok(()), Err(anyhow::anyhow!("restore failed"))).unwrap_err();
        assert_eq!(err.to_string(), "restore failed");
        assert!(first_failure(Ok(()), Ok(())).is_ok());
    }

    #[test]
    fn cli_parses_difficulty_and_seed() {
        let args = Args::parse_from(["snake", "--difficulty", "adaptive", "--seed", "7"]);
        assert_eq!(args.difficulty, Some(Difficulty::Adaptive));
        assert_eq!(args.seed, Some(7));
        assert!(args.log_file.is_none());
    }
}
