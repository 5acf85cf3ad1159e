//! Common test utilities for player integration tests.
//!
//! Sessions here run on the real tokio scheduler with a paused clock, so
//! reveal and advance delays pass instantly but in order.

#![allow(dead_code)]

pub mod fixtures;

use match_core::{DeckBuilder, GameSettings, Role, SeededRandom, SequentialIds, Session, Timer};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use word_match_player::scheduler::TokioScheduler;

/// A session wired to a tokio scheduler, plus the channel its timers arrive on.
pub struct TestGame {
    pub session: Session<TokioScheduler>,
    pub timers: UnboundedReceiver<Timer>,
}

impl TestGame {
    /// Create a game over `count` fixture pairs.
    ///
    /// # Panics
    /// Panics if the settings are rejected.
    pub fn new(count: usize, settings: GameSettings) -> Self {
        let (tx, timers) = mpsc::unbounded_channel();
        let builder = DeckBuilder::new(SeededRandom::new(42), SequentialIds::new("test"));
        let session = Session::with_builder(
            fixtures::pairs(count),
            settings,
            builder,
            TokioScheduler::new(tx),
        )
        .expect("valid test session");
        Self { session, timers }
    }

    /// Deck position of a pair's card.
    pub fn index_of(&self, pair_id: &str, role: Role) -> usize {
        self.session
            .deck()
            .cards()
            .iter()
            .position(|c| c.original_id == pair_id && c.role == role)
            .unwrap_or_else(|| panic!("{pair_id} {role:?} not in deck"))
    }

    pub fn card_id(&self, pair_id: &str, role: Role) -> String {
        self.session.deck().cards()[self.index_of(pair_id, role)].id.clone()
    }

    /// Wait for the next timer and feed it to the session.
    pub async fn next_timer(&mut self) {
        let timer = self.timers.recv().await.expect("timer channel open");
        self.session.tick(timer);
    }

    /// Select both cards of a pair and wait for the selection to clear.
    pub async fn match_pair(&mut self, pair_id: &str) {
        let word = self.card_id(pair_id, Role::Word);
        let definition = self.card_id(pair_id, Role::Definition);
        self.session.select_card(&word);
        self.session.select_card(&definition);
        self.next_timer().await;
    }
}
