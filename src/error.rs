use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("snake body could not grow: {0}")]
    Grow(#[from] TryReserveError),

    #[error("terminal is {actual_w}x{actual_h}, the board needs at least {needed_w}x{needed_h}")]
    TerminalTooSmall { needed_w: u16, needed_h: u16, actual_w: u16, actual_h: u16 },
}

pub type Result<T> = std::result::Result<T, GameError>;
