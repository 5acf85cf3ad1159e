//! Environment configuration.

use std::path::PathBuf;

use match_core::{Discipline, GameSettings};

use crate::error::{AppError, Result};

pub const BATCH_SIZE_VAR: &str = "WORD_MATCH_BATCH_SIZE";
pub const REVEAL_DELAY_VAR: &str = "WORD_MATCH_REVEAL_DELAY_MS";
pub const DISCIPLINE_VAR: &str = "WORD_MATCH_DISCIPLINE";
pub const PAIRS_VAR: &str = "WORD_MATCH_PAIRS";

/// Player configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub settings: GameSettings,
    pub pairs_path: PathBuf,
}

impl Config {
    /// Read configuration from the process environment. `path_arg` (the first
    /// command line argument) wins over `WORD_MATCH_PAIRS`.
    pub fn from_env(path_arg: Option<String>) -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), path_arg)
    }

    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        path_arg: Option<String>,
    ) -> Result<Self> {
        let mut settings = GameSettings::default();

        if let Some(value) = lookup(BATCH_SIZE_VAR) {
            settings.batch_size = parse_number(BATCH_SIZE_VAR, &value)?;
        }
        if let Some(value) = lookup(REVEAL_DELAY_VAR) {
            settings.reveal_delay_ms = parse_number(REVEAL_DELAY_VAR, &value)?;
        }
        if let Some(value) = lookup(DISCIPLINE_VAR) {
            settings.discipline = Discipline::from_str(value.trim()).ok_or_else(|| {
                AppError::Config(format!(
                    "{DISCIPLINE_VAR} must be two_slot or role_gated, got {value:?}"
                ))
            })?;
        }
        settings.validate()?;

        let pairs_path = path_arg
            .or_else(|| lookup(PAIRS_VAR))
            .map(PathBuf::from)
            .ok_or_else(|| {
                AppError::Config(format!("no pairs file; pass a path or set {PAIRS_VAR}"))
            })?;

        Ok(Self {
            settings,
            pairs_path,
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::Config(format!("{key} must be a number, got {value:?}")))
}
