//! Tick delays: fixed per difficulty, or shrinking with every food in adaptive mode.

use std::fmt;
use std::time::Duration;

use clap::ValueEnum;

use crate::snake::Direction;

/// Delay the adaptive mode starts from, in milliseconds.
pub const ADAPTIVE_START_MS: f64 = 250.0;
/// The adaptive delay never goes below this.
pub const ADAPTIVE_FLOOR_MS: f64 = 10.0;
/// Terminal cells are taller than wide, so vertical steps wait longer.
pub const VERTICAL_FACTOR: f64 = 1.35;

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Insane,
    /// Starts slow and speeds up as you score
    Adaptive,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Insane,
        Difficulty::Adaptive,
    ];

    /// Menu key selecting this difficulty.
    pub fn key(self) -> char {
        match self {
            Difficulty::Easy => 'e',
            Difficulty::Medium => 'm',
            Difficulty::Hard => 'h',
            Difficulty::Insane => 'i',
            Difficulty::Adaptive => 's',
        }
    }

    /// Expects the lowercase key, as [`crate::menu::Key::Char`] carries it.
    pub fn from_key(key: char) -> Option<Self> {
        Difficulty::ALL.iter().copied().find(|d| d.key() == key)
    }

    pub fn mode(self) -> SpeedMode {
        match self {
            Difficulty::Adaptive => SpeedMode::Adaptive,
            _ => SpeedMode::Fixed,
        }
    }

    /// Tick delay in milliseconds at the start of a game.
    pub fn base_delay_ms(self) -> f64 {
        match self {
            Difficulty::Easy => 200.0,
            Difficulty::Medium => 150.0,
            Difficulty::Hard => 80.0,
            Difficulty::Insane => 38.0,
            Difficulty::Adaptive => ADAPTIVE_START_MS,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Insane => "Insane",
            Difficulty::Adaptive => "Increase as you score",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SpeedMode {
    Fixed,
    Adaptive,
}

/// How much one food takes off an adaptive delay of `base_ms`.
pub fn adaptive_step(base_ms: f64) -> f64 {
    match base_ms {
        b if b > 200.0 => 12.0,
        b if b > 150.0 => 10.0,
        b if b > 100.0 => 8.0,
        b if b > 75.0 => 6.0,
        b if b > 60.0 => 5.0,
        b if b > 40.0 => 3.0,
        _ => 2.0,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeedController {
    base_ms: f64,
    mode: SpeedMode,
}

impl SpeedController {
    pub fn new(difficulty: Difficulty) -> Self {
        SpeedController { base_ms: difficulty.base_delay_ms(), mode: difficulty.mode() }
    }

    pub fn base_delay_ms(&self) -> f64 {
        self.base_ms
    }

    /// Speeds the game up after a food, if adaptive.
    pub fn on_food_eaten(&mut self) {
        if self.mode == SpeedMode::Adaptive && self.base_ms > ADAPTIVE_FLOOR_MS {
            self.base_ms = (self.base_ms - adaptive_step(self.base_ms)).max(ADAPTIVE_FLOOR_MS);
        }
    }

    /// Delay before the next tick for a snake travelling along `heading`.
    pub fn delay_for(&self, heading: Option<Direction>) -> Duration {
        let ms = match heading {
            Some(dir) if dir.is_vertical() => self.base_ms * VERTICAL_FACTOR,
            _ => self.base_ms,
        };
        Duration::from_micros((ms * 1000.0).round() as u64)
    }
}
