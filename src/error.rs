//! Error types for the Kalah engine.

use thiserror::Error;

use crate::board::{Pit, Player};

/// Reasons a move cannot be applied to a board.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("invalid move: pit {pit} is out of range (must be 0-5)")]
    OutOfRange { pit: usize },

    #[error("invalid move: pit {pit} is empty")]
    EmptyPit { pit: Pit },
}

/// Main error type for the crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    InvalidMove(#[from] MoveError),

    #[error("player {player} has no legal move")]
    NoLegalMove { player: Player },

    #[error("unknown agent code '{0}' (expected R, V, M or H)")]
    UnknownAgent(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
