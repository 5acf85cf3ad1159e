//! Core types for the match game.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{GameError, Result};

/// Pairs shown per batch (16 cards).
pub const DEFAULT_BATCH_SIZE: usize = 8;

/// How long a resolved selection stays visible before it is cleared.
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 1000;

/// Fewest pairs a session can start with.
pub const MIN_PAIRS: usize = 2;

/// A word and its definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub id: String,
    pub word: String,
    pub definition: String,
}

impl Pair {
    pub fn new(id: impl Into<String>, word: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            word: word.into(),
            definition: definition.into(),
        }
    }
}

/// Which side of a pair a card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Word,
    Definition,
}

/// A single tile in the deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub content: String,
    pub role: Role,
    /// Id of the pair this card was built from.
    pub original_id: String,
}

/// What the rendering layer needs to draw one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: String,
    pub content: String,
    pub role: Role,
    pub selected: bool,
    pub matched: bool,
}

/// Batch metadata for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchInfo {
    pub current_batch: usize,
    pub total_batches: usize,
    /// Fraction of the active batch matched, in `[0, 1]`.
    pub progress: f64,
}

/// Selection rules applied to card clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discipline {
    /// Any two cards, in any order.
    TwoSlot,
    /// A word first, then a definition.
    RoleGated,
}

impl Default for Discipline {
    fn default() -> Self {
        Self::TwoSlot
    }
}

impl Discipline {
    /// Get the discipline name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TwoSlot => "two_slot",
            Self::RoleGated => "role_gated",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "two_slot" => Some(Self::TwoSlot),
            "role_gated" => Some(Self::RoleGated),
            _ => None,
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub batch_size: usize,
    pub reveal_delay_ms: u64,
    pub discipline: Discipline,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
            discipline: Discipline::default(),
        }
    }
}

impl GameSettings {
    /// Reject settings the session cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(GameError::InvalidBatchSize {
                value: self.batch_size,
            });
        }
        Ok(())
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}
