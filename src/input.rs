use std::str::FromStr;

use thiserror::Error;

use crate::grid::Direction;

/// Player intents the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Steer(Direction),
    /// Pause while running, resume while paused.
    TogglePause,
    /// Start a fresh session from `NotStarted` or `GameOver`.
    Restart,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised input token: {0:?}")]
pub struct ParseInputError(pub String);

impl FromStr for Direction {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "w" | "k" => Ok(Self::Up),
            "down" | "s" | "j" => Ok(Self::Down),
            "left" | "a" | "h" => Ok(Self::Left),
            "right" | "d" | "l" => Ok(Self::Right),
            _ => Err(ParseInputError(s.to_string())),
        }
    }
}

impl FromStr for Input {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pause" | "resume" | "p" => Ok(Self::TogglePause),
            "start" | "restart" | "r" => Ok(Self::Restart),
            _ => s.parse().map(Self::Steer),
        }
    }
}
