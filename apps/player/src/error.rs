//! Error handling for the terminal player

use std::path::PathBuf;

use match_core::GameError;
use thiserror::Error;

/// Player error types
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid pairs file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Game error: {0}")]
    Game(#[from] GameError),
}

/// Result type alias for player operations
pub type Result<T> = std::result::Result<T, AppError>;
