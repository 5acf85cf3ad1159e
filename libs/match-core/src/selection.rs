//! Card selection rules and match evaluation.
//!
//! Two disciplines share one engine:
//! - [`Discipline::TwoSlot`]: any two unmatched cards, clicked in any order.
//! - [`Discipline::RoleGated`]: a word must be picked before a definition.
//!   Picking a word while a definition is showing drops the definition, and
//!   re-clicking the picked word puts it back. Picking another definition
//!   while a mismatch is showing replaces the shown one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::types::{Card, Discipline, Role};

/// Most cards that can be selected at once.
pub const MAX_SELECTED: usize = 2;

/// Why a click was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// Two cards are showing and waiting to be cleared.
    Resolving,
    AlreadySelected,
    AlreadyMatched,
    /// Definition clicked with no word picked (role-gated only).
    NoWordSelected,
    UnknownCard,
    SessionComplete,
    /// Advance asked for on the last batch.
    LastBatch,
    /// Advance asked for before every pair in the batch is matched.
    BatchNotCleared,
    /// Retreat asked for on the first batch.
    FirstBatch,
}

/// What an accepted click did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Card added; the selection is not full yet.
    Picked { interrupted: bool },
    /// Selected word clicked again and dropped.
    Deselected { interrupted: bool },
    /// Second card added; the pair must be evaluated.
    Full,
}

impl Step {
    /// Whether the click cut short a pair that was waiting to be cleared.
    pub fn interrupted(&self) -> bool {
        match self {
            Self::Picked { interrupted } | Self::Deselected { interrupted } => *interrupted,
            Self::Full => false,
        }
    }
}

/// The 0 to 2 cards currently chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    cards: Vec<Card>,
}

impl Selection {
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cards.len() >= MAX_SELECTED
    }

    pub fn contains(&self, card_id: &str) -> bool {
        self.cards.iter().any(|c| c.id == card_id)
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Pair id shared by both selected cards, if the selection is a match.
    pub fn matched_pair(&self) -> Option<&str> {
        match self.cards.as_slice() {
            [first, second] if first.original_id == second.original_id => {
                Some(first.original_id.as_str())
            }
            _ => None,
        }
    }

    fn has_role(&self, role: Role) -> bool {
        self.cards.iter().any(|c| c.role == role)
    }

    /// Apply a click under `discipline`.
    pub fn select(
        &mut self,
        card: &Card,
        matched: &BTreeSet<String>,
        discipline: Discipline,
    ) -> Result<Step, Rejection> {
        match discipline {
            Discipline::TwoSlot => self.select_two_slot(card, matched),
            Discipline::RoleGated => self.select_role_gated(card, matched),
        }
    }

    fn select_two_slot(&mut self, card: &Card, matched: &BTreeSet<String>) -> Result<Step, Rejection> {
        if self.is_full() {
            return Err(Rejection::Resolving);
        }
        if self.contains(&card.id) {
            return Err(Rejection::AlreadySelected);
        }
        if matched.contains(&card.original_id) {
            return Err(Rejection::AlreadyMatched);
        }

        self.cards.push(card.clone());
        Ok(self.step_after_push())
    }

    fn select_role_gated(&mut self, card: &Card, matched: &BTreeSet<String>) -> Result<Step, Rejection> {
        if matched.contains(&card.original_id) {
            return Err(Rejection::AlreadyMatched);
        }

        match card.role {
            Role::Word => {
                let interrupted = self.has_role(Role::Definition);
                let reclicked = self.contains(&card.id);
                self.cards.clear();
                if reclicked {
                    return Ok(Step::Deselected { interrupted });
                }
                self.cards.push(card.clone());
                Ok(Step::Picked { interrupted })
            }
            Role::Definition => {
                if !self.has_role(Role::Word) {
                    return Err(Rejection::NoWordSelected);
                }
                if self.contains(&card.id) {
                    return Err(Rejection::AlreadySelected);
                }
                if self.is_full() {
                    if self.matched_pair().is_some() {
                        return Err(Rejection::Resolving);
                    }
                    // A mismatched definition is swapped out and the word re-evaluated.
                    self.cards.retain(|c| c.role == Role::Word);
                }
                self.cards.push(card.clone());
                Ok(self.step_after_push())
            }
        }
    }

    fn step_after_push(&self) -> Step {
        if self.is_full() {
            Step::Full
        } else {
            Step::Picked { interrupted: false }
        }
    }
}
