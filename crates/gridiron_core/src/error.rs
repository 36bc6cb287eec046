use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Game-state invariants checked by the audit gates after every play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Invariant {
    FieldPosition,
    Down,
    YardsToGo,
    Momentum,
    Clock,
    Score,
}

impl fmt::Display for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Invariant::FieldPosition => "field position in 0..=100",
            Invariant::Down => "down in 1..=4",
            Invariant::YardsToGo => "yards to go >= 1",
            Invariant::Momentum => "momentum in [0, 1]",
            Invariant::Clock => "clock within period",
            Invariant::Score => "scores non-decreasing",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum SimError {
    #[error("invariant violated after play {play}: {invariant} ({detail})")]
    InvariantViolation { play: usize, invariant: Invariant, detail: String },

    #[error("game already ended")]
    GameOver,

    #[error("game has not ended yet")]
    GameNotFinished,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SimError {
    /// Invariant violations indicate a bug in the engine, everything else is a caller problem.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SimError::InvariantViolation { .. })
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
