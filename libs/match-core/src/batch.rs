//! Batch pagination over the pair list.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::error::{GameError, Result};
use crate::types::DEFAULT_BATCH_SIZE;

/// Index range of the pairs in batch `index`, clipped to `total`.
pub fn batch_range(total: usize, index: usize, size: usize) -> Range<usize> {
    let start = index.saturating_mul(size).min(total);
    let end = start.saturating_add(size).min(total);
    start..end
}

/// Tracks which batch of pairs is in play.
///
/// Matched pairs are not remembered per batch: moving to another batch,
/// in either direction, shows it fresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchScheduler {
    total_pairs: usize,
    batch_size: usize,
    current: usize,
}

impl Default for BatchScheduler {
    fn default() -> Self {
        Self {
            total_pairs: 0,
            batch_size: DEFAULT_BATCH_SIZE,
            current: 0,
        }
    }
}

impl BatchScheduler {
    pub fn new(total_pairs: usize, batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(GameError::InvalidBatchSize { value: batch_size });
        }
        Ok(Self {
            total_pairs,
            batch_size,
            current: 0,
        })
    }

    pub fn total_pairs(&self) -> usize {
        self.total_pairs
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn total_batches(&self) -> usize {
        self.total_pairs.div_ceil(self.batch_size)
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.total_batches()
    }

    /// Pair indices of the current batch.
    pub fn range(&self) -> Range<usize> {
        batch_range(self.total_pairs, self.current, self.batch_size)
    }

    /// Pairs in the current batch; smaller than the batch size only for a short last batch.
    pub fn pairs_in_current(&self) -> usize {
        self.range().len()
    }

    /// Whether `matched` pairs clear the current batch.
    pub fn is_cleared(&self, matched: usize) -> bool {
        let needed = self.pairs_in_current();
        needed > 0 && matched >= needed
    }

    /// Move to the next batch. Returns false on the last batch.
    pub fn advance(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Move to the previous batch. Returns false on the first batch.
    pub fn retreat(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// Completion of the active batch for display, in `[0, 1]`.
    pub fn progress(matched: usize, cards_in_batch: usize) -> f64 {
        if cards_in_batch == 0 {
            return 0.0;
        }
        (matched as f64 / cards_in_batch as f64 * 2.0).clamp(0.0, 1.0)
    }
}
