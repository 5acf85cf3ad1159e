//! Error types for match-core.

use thiserror::Error;

/// Result type alias using GameError.
pub type Result<T> = std::result::Result<T, GameError>;

/// Configuration and pair-store faults.
///
/// Selection rejections are not errors; see [`crate::selection::Rejection`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("batch size must be at least 1, got {value}")]
    InvalidBatchSize { value: usize },

    #[error("at least {min} pairs are needed to start, got {count}")]
    NotEnoughPairs { count: usize, min: usize },

    #[error("duplicate pair id {0}")]
    DuplicatePairId(String),

    #[error("pair {0} not found")]
    PairNotFound(String),

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
}
