//! Deck building: turning a batch of pairs into shuffled cards.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::batch::batch_range;
use crate::types::{Card, Pair, Role};

/// Source of shuffle randomness.
pub trait RandomSource: Send {
    /// Uniform index in `[0, upper)`. `upper` is never zero.
    fn next_index(&mut self, upper: usize) -> usize;
}

/// Source of card ids. Every call must return an id not returned before.
pub trait IdGenerator: Send {
    fn next_id(&mut self) -> String;
}

/// Thread-local RNG from `rand`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_index(&mut self, upper: usize) -> usize {
        rand::rng().random_range(0..upper)
    }
}

/// Reproducible RNG for tests and replays.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_index(&mut self, upper: usize) -> usize {
        self.rng.random_range(0..upper)
    }
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// `prefix-0`, `prefix-1`, ... Never repeats within one generator.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("card")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Shuffled cards for the active batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of pairs in the deck (two cards each).
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    pub fn get(&self, card_id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card_id)
    }

    pub fn contains_pair(&self, pair_id: &str) -> bool {
        self.cards.iter().any(|c| c.original_id == pair_id)
    }
}

impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}

/// Builds decks with injectable randomness and id generation.
pub struct DeckBuilder {
    random: Box<dyn RandomSource>,
    ids: Box<dyn IdGenerator>,
}

impl Default for DeckBuilder {
    fn default() -> Self {
        Self::new(ThreadRandom, UuidIds)
    }
}

impl std::fmt::Debug for DeckBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeckBuilder").finish_non_exhaustive()
    }
}

impl DeckBuilder {
    pub fn new(random: impl RandomSource + 'static, ids: impl IdGenerator + 'static) -> Self {
        Self {
            random: Box::new(random),
            ids: Box::new(ids),
        }
    }

    /// Build the deck for one batch of `pairs`. `pairs` is left untouched.
    pub fn build(&mut self, pairs: &[Pair], batch_index: usize, batch_size: usize) -> Deck {
        let batch = &pairs[batch_range(pairs.len(), batch_index, batch_size)];

        let mut cards = Vec::with_capacity(batch.len() * 2);
        for pair in batch {
            cards.push(Card {
                id: self.ids.next_id(),
                content: pair.word.clone(),
                role: Role::Word,
                original_id: pair.id.clone(),
            });
        }
        for pair in batch {
            cards.push(Card {
                id: self.ids.next_id(),
                content: pair.definition.clone(),
                role: Role::Definition,
                original_id: pair.id.clone(),
            });
        }

        self.shuffle(&mut cards);
        tracing::debug!(batch_index, cards = cards.len(), "built deck");
        Deck { cards }
    }

    // Fisher-Yates
    fn shuffle(&mut self, cards: &mut [Card]) {
        for i in (1..cards.len()).rev() {
            let j = self.random.next_index(i + 1);
            cards.swap(i, j);
        }
    }
}
