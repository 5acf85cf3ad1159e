//! Match-game sessions.
//!
//! [`state`] holds the pure transitions; [`Session`] owns the pairs, the deck
//! builder and a [`Scheduler`], and runs the commands those transitions ask for.

pub mod scheduler;
pub mod state;

pub use scheduler::{ManualScheduler, Scheduler, Timer};
pub use state::{
    apply_advance, apply_reset, apply_retreat, apply_select, apply_tick, Command, Outcome, Phase,
    SessionState, Transition,
};

use std::collections::HashSet;
use std::time::Duration;

use crate::batch::BatchScheduler;
use crate::completion::CompletionNotifier;
use crate::deck::{Deck, DeckBuilder};
use crate::error::{GameError, Result};
use crate::types::{BatchInfo, CardView, GameSettings, Pair, MIN_PAIRS};

/// A running game over a fixed list of pairs.
#[derive(Debug)]
pub struct Session<S: Scheduler> {
    pairs: Vec<Pair>,
    settings: GameSettings,
    builder: DeckBuilder,
    scheduler: S,
    completion: CompletionNotifier,
    state: SessionState,
}

impl<S: Scheduler> Session<S> {
    /// Start a session with random shuffles and UUID card ids.
    pub fn new(pairs: Vec<Pair>, settings: GameSettings, scheduler: S) -> Result<Self> {
        Self::with_builder(pairs, settings, DeckBuilder::default(), scheduler)
    }

    pub fn with_builder(
        pairs: Vec<Pair>,
        settings: GameSettings,
        mut builder: DeckBuilder,
        scheduler: S,
    ) -> Result<Self> {
        settings.validate()?;
        if pairs.len() < MIN_PAIRS {
            return Err(GameError::NotEnoughPairs {
                count: pairs.len(),
                min: MIN_PAIRS,
            });
        }
        let mut ids = HashSet::new();
        for pair in &pairs {
            if !ids.insert(pair.id.as_str()) {
                return Err(GameError::DuplicatePairId(pair.id.clone()));
            }
        }

        let batches = BatchScheduler::new(pairs.len(), settings.batch_size)?;
        tracing::info!(
            pairs = pairs.len(),
            batches = batches.total_batches(),
            discipline = settings.discipline.as_str(),
            "starting session"
        );
        let deck = builder.build(&pairs, 0, settings.batch_size);
        let state = SessionState::new(batches).with_deck(deck);

        Ok(Self {
            pairs,
            settings,
            builder,
            scheduler,
            completion: CompletionNotifier::default(),
            state,
        })
    }

    /// Register the "game complete" callback.
    pub fn on_complete(mut self, callback: impl FnMut() + Send + 'static) -> Self {
        self.completion = CompletionNotifier::new(callback);
        self
    }

    pub fn select_card(&mut self, card_id: &str) -> Outcome {
        let discipline = self.settings.discipline;
        let delay = self.settings.reveal_delay();
        self.apply(|state| apply_select(state, card_id, discipline, delay))
    }

    /// Feed back a timer the scheduler has fired.
    pub fn tick(&mut self, timer: Timer) -> Outcome {
        let delay = self.settings.reveal_delay();
        self.apply(|state| apply_tick(state, timer, delay))
    }

    pub fn advance_batch(&mut self) -> Outcome {
        self.apply(apply_advance)
    }

    pub fn retreat_batch(&mut self) -> Outcome {
        self.apply(apply_retreat)
    }

    /// Start over from the first batch with a freshly shuffled deck.
    pub fn play_again(&mut self) -> Outcome {
        self.apply(apply_reset)
    }

    pub fn cards(&self) -> Vec<CardView> {
        self.state.card_views()
    }

    pub fn batch_info(&self) -> BatchInfo {
        self.state.batch_info()
    }

    pub fn is_selected(&self, card_id: &str) -> bool {
        self.state.is_selected(card_id)
    }

    pub fn is_matched(&self, card_id: &str) -> bool {
        self.state.is_matched(card_id)
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    pub fn deck(&self) -> &Deck {
        self.state.deck()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn apply(&mut self, transition: impl FnOnce(SessionState) -> Transition) -> Outcome {
        let generation = self.state.generation();
        let Transition {
            state,
            outcome,
            commands,
        } = transition(std::mem::take(&mut self.state));
        self.state = state;

        if self.state.generation() != generation {
            self.scheduler.cancel_all();
        }
        for command in commands {
            self.run(command);
        }

        match &outcome {
            Outcome::BatchAdvanced { batch_index } | Outcome::BatchRetreated { batch_index } => {
                tracing::info!(batch_index, "batch changed");
            }
            Outcome::Reset => tracing::info!("session reset"),
            other => tracing::debug!(outcome = ?other, "transition"),
        }
        outcome
    }

    fn run(&mut self, command: Command) {
        match command {
            Command::Schedule { delay, timer } => self.scheduler.after(delay, timer),
            Command::RebuildDeck { batch_index } => {
                let deck = self
                    .builder
                    .build(&self.pairs, batch_index, self.settings.batch_size);
                self.state.install_deck(deck);
            }
            Command::NotifyComplete => {
                tracing::info!("all batches matched");
                self.completion.notify();
            }
        }
    }
}

impl Session<ManualScheduler> {
    /// Advance the virtual clock by `by`, firing every timer that comes due,
    /// including ones scheduled by earlier timers within the same window.
    pub fn elapse(&mut self, by: Duration) -> Vec<Outcome> {
        let until = self.scheduler.now() + by;
        let mut outcomes = Vec::new();
        while let Some(timer) = self.scheduler.pop_due(until) {
            outcomes.push(self.tick(timer));
        }
        self.scheduler.set_now(until);
        outcomes
    }
}
