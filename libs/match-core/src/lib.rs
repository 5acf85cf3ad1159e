//! Word/definition matching game engine.
//!
//! Provides:
//! - Pair store and bulk `word - definition` parser
//! - Deck building with injectable shuffle and card ids
//! - Selection rules (two-slot and role-gated) with match evaluation
//! - Batch pagination, progress and completion detection
//! - Sessions as pure state transitions plus a scheduler-driven runner

pub mod batch;
pub mod completion;
pub mod deck;
pub mod error;
pub mod parser;
pub mod selection;
pub mod session;
pub mod store;
pub mod types;

pub use batch::BatchScheduler;
pub use deck::{Deck, DeckBuilder, IdGenerator, RandomSource, SeededRandom, SequentialIds, ThreadRandom, UuidIds};
pub use error::{GameError, Result};
pub use parser::{parse, ParsedBulk, RawPair};
pub use selection::{Rejection, Selection};
pub use session::{ManualScheduler, Outcome, Phase, Scheduler, Session, SessionState, Timer};
pub use store::PairStore;
pub use types::{
    BatchInfo, Card, CardView, Discipline, GameSettings, Pair, Role, DEFAULT_BATCH_SIZE,
    DEFAULT_REVEAL_DELAY_MS, MIN_PAIRS,
};
