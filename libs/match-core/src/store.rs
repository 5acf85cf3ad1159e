//! Ordered, id-keyed pair store.

use uuid::Uuid;

use crate::error::{GameError, Result};
use crate::parser;
use crate::types::{Pair, MIN_PAIRS};

/// Word pairs in insertion order.
#[derive(Debug, Clone, Default)]
pub struct PairStore {
    pairs: Vec<Pair>,
}

impl PairStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new pair with a fresh id.
    pub fn add(&mut self, word: &str, definition: &str) -> Result<&Pair> {
        let (word, definition) = clean_fields(word, definition)?;
        self.pairs.push(Pair {
            id: Uuid::new_v4().to_string(),
            word,
            definition,
        });
        Ok(&self.pairs[self.pairs.len() - 1])
    }

    /// Insert a pair that already carries an id.
    pub fn insert(&mut self, pair: Pair) -> Result<()> {
        if self.get(&pair.id).is_some() {
            return Err(GameError::DuplicatePairId(pair.id));
        }
        self.pairs.push(pair);
        Ok(())
    }

    /// Replace the text of an existing pair, keeping its id and position.
    pub fn update(&mut self, id: &str, word: &str, definition: &str) -> Result<()> {
        let (word, definition) = clean_fields(word, definition)?;
        let pair = self
            .pairs
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| GameError::PairNotFound(id.to_string()))?;
        pair.word = word;
        pair.definition = definition;
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<Pair> {
        let idx = self
            .pairs
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| GameError::PairNotFound(id.to_string()))?;
        Ok(self.pairs.remove(idx))
    }

    pub fn get(&self, id: &str) -> Option<&Pair> {
        self.pairs.iter().find(|p| p.id == id)
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    /// Whether there are enough pairs to start a session.
    pub fn can_start(&self) -> bool {
        self.pairs.len() >= MIN_PAIRS
    }

    /// Add every well-formed pair from bulk text. Returns how many were added.
    pub fn import_bulk(&mut self, content: &str) -> usize {
        let parsed = parser::parse(content);
        if !parsed.skipped.is_empty() {
            tracing::warn!(lines = ?parsed.skipped, "ignored malformed bulk lines");
        }

        let mut added = 0;
        for raw in parsed.pairs {
            if self.add(&raw.word, &raw.definition).is_ok() {
                added += 1;
            }
        }
        added
    }
}

fn clean_fields(word: &str, definition: &str) -> Result<(String, String)> {
    let word = word.trim();
    let definition = definition.trim();
    if word.is_empty() {
        return Err(GameError::EmptyField { field: "word" });
    }
    if definition.is_empty() {
        return Err(GameError::EmptyField { field: "definition" });
    }
    Ok((word.to_string(), definition.to_string()))
}
