//! Session state and its pure transition functions.
//!
//! Every transition takes the state by value and returns the next state plus
//! the side effects to run. Nothing here touches a clock or an RNG, so whole
//! games can be replayed in tests by feeding timers back in by hand.

use std::collections::BTreeSet;
use std::time::Duration;

use crate::batch::BatchScheduler;
use crate::completion;
use crate::deck::Deck;
use crate::selection::{Rejection, Selection, Step};
use crate::types::{BatchInfo, Card, CardView, Discipline};

use super::scheduler::Timer;

/// Where the session is between clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// Every pair in the batch is matched; waiting for the selection to clear.
    BatchCleared,
    /// Selection cleared; waiting for the advance delay.
    Advancing,
    /// Last batch matched. Only a reset leaves this phase.
    Complete,
}

impl Default for Phase {
    fn default() -> Self {
        Self::Playing
    }
}

/// Result of a transition, for callers and logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Ignored(Rejection),
    Selected,
    Deselected,
    Matched { pair_id: String },
    Mismatched,
    SelectionCleared,
    BatchAdvanced { batch_index: usize },
    BatchRetreated { batch_index: usize },
    Reset,
    /// Timer from an earlier generation or selection; dropped.
    Stale,
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Schedule { delay: Duration, timer: Timer },
    RebuildDeck { batch_index: usize },
    NotifyComplete,
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub state: SessionState,
    pub outcome: Outcome,
    pub commands: Vec<Command>,
}

impl Transition {
    fn new(state: SessionState, outcome: Outcome) -> Self {
        Self {
            state,
            outcome,
            commands: Vec::new(),
        }
    }

    fn ignored(state: SessionState, rejection: Rejection) -> Self {
        Self::new(state, Outcome::Ignored(rejection))
    }

    fn with(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }
}

/// Everything that changes during play.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    batches: BatchScheduler,
    deck: Deck,
    selection: Selection,
    matched: BTreeSet<String>,
    phase: Phase,
    /// Bumped on every batch change and reset.
    generation: u64,
    /// Bumped whenever a pending selection clear stops applying.
    token: u64,
}

impl SessionState {
    pub fn new(batches: BatchScheduler) -> Self {
        Self {
            batches,
            ..Default::default()
        }
    }

    pub fn with_deck(mut self, deck: Deck) -> Self {
        self.install_deck(deck);
        self
    }

    /// Put a freshly built deck in play. Selection and matches start empty.
    pub fn install_deck(&mut self, deck: Deck) {
        self.deck = deck;
        self.selection.clear();
        self.matched.clear();
    }

    pub fn batches(&self) -> &BatchScheduler {
        &self.batches
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn matched(&self) -> &BTreeSet<String> {
        &self.matched
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn is_selected(&self, card_id: &str) -> bool {
        self.selection.contains(card_id)
    }

    pub fn is_matched(&self, card_id: &str) -> bool {
        self.deck
            .get(card_id)
            .is_some_and(|card| self.matched.contains(&card.original_id))
    }

    pub fn card_view(&self, card: &Card) -> CardView {
        CardView {
            id: card.id.clone(),
            content: card.content.clone(),
            role: card.role,
            selected: self.selection.contains(&card.id),
            matched: self.matched.contains(&card.original_id),
        }
    }

    pub fn card_views(&self) -> Vec<CardView> {
        self.deck.cards().iter().map(|c| self.card_view(c)).collect()
    }

    pub fn batch_info(&self) -> BatchInfo {
        BatchInfo {
            current_batch: self.batches.current(),
            total_batches: self.batches.total_batches(),
            progress: BatchScheduler::progress(self.matched.len(), self.deck.len()),
        }
    }

    fn leave_batch(&mut self) {
        self.generation += 1;
        self.deck = Deck::default();
        self.selection.clear();
        self.matched.clear();
        self.phase = Phase::Playing;
    }
}

/// A card click.
pub fn apply_select(
    mut state: SessionState,
    card_id: &str,
    discipline: Discipline,
    delay: Duration,
) -> Transition {
    if state.is_complete() {
        return Transition::ignored(state, Rejection::SessionComplete);
    }
    let Some(card) = state.deck.get(card_id).cloned() else {
        return Transition::ignored(state, Rejection::UnknownCard);
    };

    let step = match state.selection.select(&card, &state.matched, discipline) {
        Ok(step) => step,
        Err(rejection) => return Transition::ignored(state, rejection),
    };
    if step.interrupted() {
        state.token += 1;
    }

    match step {
        Step::Picked { .. } => Transition::new(state, Outcome::Selected),
        Step::Deselected { .. } => Transition::new(state, Outcome::Deselected),
        Step::Full => evaluate(state, delay),
    }
}

fn evaluate(mut state: SessionState, delay: Duration) -> Transition {
    state.token += 1;
    let clear = Command::Schedule {
        delay,
        timer: Timer::ClearSelection {
            generation: state.generation,
            token: state.token,
        },
    };

    let Some(pair_id) = state.selection.matched_pair().map(str::to_string) else {
        return Transition::new(state, Outcome::Mismatched).with(clear);
    };
    state.matched.insert(pair_id.clone());

    let mut transition = Transition::new(state, Outcome::Matched { pair_id }).with(clear);
    let state = &mut transition.state;
    if completion::is_complete(&state.batches, state.matched.len()) {
        state.phase = Phase::Complete;
        transition.commands.push(Command::NotifyComplete);
    } else if state.batches.is_cleared(state.matched.len()) {
        state.phase = Phase::BatchCleared;
    }
    transition
}

/// A timer firing.
pub fn apply_tick(mut state: SessionState, timer: Timer, delay: Duration) -> Transition {
    match timer {
        Timer::ClearSelection { generation, token } => {
            if generation != state.generation || token != state.token {
                return Transition::new(state, Outcome::Stale);
            }
            state.selection.clear();

            if state.phase != Phase::BatchCleared {
                return Transition::new(state, Outcome::SelectionCleared);
            }
            // The advance delay only starts once the selection is gone.
            state.phase = Phase::Advancing;
            let advance = Command::Schedule {
                delay,
                timer: Timer::AdvanceBatch {
                    generation: state.generation,
                },
            };
            Transition::new(state, Outcome::SelectionCleared).with(advance)
        }
        Timer::AdvanceBatch { generation } => {
            if generation != state.generation || state.phase != Phase::Advancing {
                return Transition::new(state, Outcome::Stale);
            }
            apply_advance(state)
        }
    }
}

/// Move to the next batch. Only a cleared batch can be left forwards.
pub fn apply_advance(mut state: SessionState) -> Transition {
    if state.is_complete() {
        return Transition::ignored(state, Rejection::SessionComplete);
    }
    if state.batches.is_last() {
        return Transition::ignored(state, Rejection::LastBatch);
    }
    if !state.batches.is_cleared(state.matched.len()) {
        return Transition::ignored(state, Rejection::BatchNotCleared);
    }
    state.batches.advance();

    state.leave_batch();
    let batch_index = state.batches.current();
    Transition::new(state, Outcome::BatchAdvanced { batch_index })
        .with(Command::RebuildDeck { batch_index })
}

/// Move back to the previous batch, which starts over unmatched.
pub fn apply_retreat(mut state: SessionState) -> Transition {
    if state.is_complete() {
        return Transition::ignored(state, Rejection::SessionComplete);
    }
    if !state.batches.retreat() {
        return Transition::ignored(state, Rejection::FirstBatch);
    }

    state.leave_batch();
    let batch_index = state.batches.current();
    Transition::new(state, Outcome::BatchRetreated { batch_index })
        .with(Command::RebuildDeck { batch_index })
}

/// Start over from the first batch.
pub fn apply_reset(mut state: SessionState) -> Transition {
    state.batches.reset();
    state.leave_batch();
    Transition::new(state, Outcome::Reset).with(Command::RebuildDeck { batch_index: 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{DeckBuilder, SeededRandom, SequentialIds};
    use crate::types::{Pair, Role};
    use pretty_assertions::assert_eq;

    const DELAY: Duration = Duration::from_millis(1000);

    fn pairs(count: usize) -> Vec<Pair> {
        (0..count)
            .map(|i| Pair::new(format!("p{i}"), format!("word {i}"), format!("definition {i}")))
            .collect()
    }

    fn start(count: usize, batch_size: usize) -> (Vec<Pair>, DeckBuilder, SessionState) {
        let pairs = pairs(count);
        let mut builder = DeckBuilder::new(SeededRandom::new(11), SequentialIds::default());
        let deck = builder.build(&pairs, 0, batch_size);
        let state = SessionState::new(BatchScheduler::new(count, batch_size).unwrap()).with_deck(deck);
        (pairs, builder, state)
    }

    fn card_id(state: &SessionState, pair_id: &str, role: Role) -> String {
        state
            .deck()
            .cards()
            .iter()
            .find(|c| c.original_id == pair_id && c.role == role)
            .map(|c| c.id.clone())
            .unwrap()
    }

    fn click(state: SessionState, pair_id: &str, role: Role) -> Transition {
        let id = card_id(&state, pair_id, role);
        apply_select(state, &id, Discipline::TwoSlot, DELAY)
    }

    fn clear_timer(transition: &Transition) -> Timer {
        transition
            .commands
            .iter()
            .find_map(|c| match c {
                Command::Schedule { timer, .. } => Some(*timer),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn match_is_recorded_immediately() {
        let (_, _, state) = start(4, 8);
        let t = click(state, "p1", Role::Word);
        assert_eq!(t.outcome, Outcome::Selected);
        assert!(t.commands.is_empty());

        let t = click(t.state, "p1", Role::Definition);
        assert_eq!(t.outcome, Outcome::Matched { pair_id: "p1".to_string() });
        assert!(t.state.matched().contains("p1"));
        assert_eq!(t.state.selection().len(), 2);

        let word = card_id(&t.state, "p1", Role::Word);
        assert!(t.state.is_selected(&word));
        assert!(t.state.is_matched(&word));
    }

    #[test]
    fn mismatch_clears_after_delay() {
        let (_, _, state) = start(4, 8);
        let t = click(state, "p0", Role::Word);
        let t = click(t.state, "p2", Role::Definition);
        assert_eq!(t.outcome, Outcome::Mismatched);
        assert!(t.state.matched().is_empty());
        assert_eq!(
            t.commands,
            vec![Command::Schedule {
                delay: DELAY,
                timer: Timer::ClearSelection { generation: 0, token: 1 },
            }]
        );

        let timer = clear_timer(&t);
        let word = card_id(&t.state, "p0", Role::Word);
        let t = apply_tick(t.state, timer, DELAY);
        assert_eq!(t.outcome, Outcome::SelectionCleared);
        assert!(!t.state.is_selected(&word));
        assert!(!t.state.is_matched(&word));
    }

    #[test]
    fn clicks_during_resolution_are_ignored() {
        let (_, _, state) = start(4, 8);
        let t = click(state, "p0", Role::Word);
        let t = click(t.state, "p1", Role::Word);
        let t = click(t.state, "p2", Role::Word);
        assert_eq!(t.outcome, Outcome::Ignored(Rejection::Resolving));
    }

    #[test]
    fn unknown_card_is_ignored() {
        let (_, _, state) = start(2, 8);
        let t = apply_select(state, "nope", Discipline::TwoSlot, DELAY);
        assert_eq!(t.outcome, Outcome::Ignored(Rejection::UnknownCard));
    }

    fn match_pair(state: SessionState, pair_id: &str) -> (SessionState, Vec<Command>) {
        let t = click(state, pair_id, Role::Word);
        let t = click(t.state, pair_id, Role::Definition);
        let timer = clear_timer(&t);
        let commands = t.commands.clone();
        let cleared = apply_tick(t.state, timer, DELAY);
        let mut all = commands;
        all.extend(cleared.commands);
        (cleared.state, all)
    }

    #[test]
    fn clearing_a_batch_schedules_advance_after_clear() {
        let (pairs, mut builder, mut state) = start(10, 8);
        for i in 0..7 {
            state = match_pair(state, &format!("p{i}")).0;
        }

        let t = click(state, "p7", Role::Word);
        let t = click(t.state, "p7", Role::Definition);
        assert_eq!(t.state.phase(), Phase::BatchCleared);
        assert_eq!(t.commands.len(), 1);

        let timer = clear_timer(&t);
        let t = apply_tick(t.state, timer, DELAY);
        assert_eq!(t.state.phase(), Phase::Advancing);
        let advance = clear_timer(&t);
        assert_eq!(advance, Timer::AdvanceBatch { generation: 0 });

        let t = apply_tick(t.state, advance, DELAY);
        assert_eq!(t.outcome, Outcome::BatchAdvanced { batch_index: 1 });
        assert_eq!(t.commands, vec![Command::RebuildDeck { batch_index: 1 }]);
        assert!(t.state.matched().is_empty());

        let mut state = t.state;
        state.install_deck(builder.build(&pairs, 1, 8));
        assert_eq!(state.deck().len(), 4);
        assert_eq!(state.batch_info().current_batch, 1);
    }

    #[test]
    fn last_batch_completes_once() {
        let (_, _, mut state) = start(2, 8);
        state = match_pair(state, "p0").0;

        let t = click(state, "p1", Role::Word);
        let t = click(t.state, "p1", Role::Definition);
        let notifications = t
            .commands
            .iter()
            .filter(|c| **c == Command::NotifyComplete)
            .count();
        assert_eq!(notifications, 1);
        assert!(t.state.is_complete());

        let timer = clear_timer(&t);
        let t = apply_tick(t.state, timer, DELAY);
        assert_eq!(t.outcome, Outcome::SelectionCleared);
        assert!(t.commands.is_empty());

        let t = apply_advance(t.state);
        assert_eq!(t.outcome, Outcome::Ignored(Rejection::SessionComplete));
    }

    #[test]
    fn stale_clear_after_reset_has_no_effect() {
        let (_, _, state) = start(4, 8);
        let t = click(state, "p0", Role::Word);
        let t = click(t.state, "p1", Role::Definition);
        let timer = clear_timer(&t);

        let t = apply_reset(t.state);
        assert_eq!(t.outcome, Outcome::Reset);
        assert_eq!(t.state.generation(), 1);

        let t = apply_tick(t.state, timer, DELAY);
        assert_eq!(t.outcome, Outcome::Stale);
        assert!(t.commands.is_empty());
    }

    #[test]
    fn advance_requires_a_cleared_batch() {
        let (_, _, state) = start(10, 8);
        let t = apply_advance(state);
        assert_eq!(t.outcome, Outcome::Ignored(Rejection::BatchNotCleared));
        assert!(t.commands.is_empty());

        let (state, _) = match_pair(t.state, "p0");
        let t = apply_advance(state);
        assert_eq!(t.outcome, Outcome::Ignored(Rejection::BatchNotCleared));
        assert_eq!(t.state.batches().current(), 0);
        assert_eq!(t.state.generation(), 0);
    }

    fn second_batch(count: usize) -> (Vec<Pair>, DeckBuilder, SessionState) {
        let (pairs, mut builder, mut state) = start(count, 8);
        for i in 0..8 {
            state = match_pair(state, &format!("p{i}")).0;
        }
        let mut t = apply_advance(state);
        assert_eq!(t.outcome, Outcome::BatchAdvanced { batch_index: 1 });
        t.state.install_deck(builder.build(&pairs, 1, 8));
        (pairs, builder, t.state)
    }

    #[test]
    fn stale_clear_after_retreat_has_no_effect() {
        let (pairs, mut builder, state) = second_batch(17);
        let t = click(state, "p8", Role::Word);
        let t = click(t.state, "p9", Role::Definition);
        assert_eq!(t.outcome, Outcome::Mismatched);
        let timer = clear_timer(&t);

        let mut t = apply_retreat(t.state);
        assert_eq!(t.outcome, Outcome::BatchRetreated { batch_index: 0 });
        t.state.install_deck(builder.build(&pairs, 0, 8));

        let w0 = card_id(&t.state, "p0", Role::Word);
        let t = apply_select(t.state, &w0, Discipline::TwoSlot, DELAY);
        let t = apply_tick(t.state, timer, DELAY);
        assert_eq!(t.outcome, Outcome::Stale);
        assert!(t.commands.is_empty());
        assert!(t.state.is_selected(&w0));
    }

    #[test]
    fn stale_advance_after_retreat_has_no_effect() {
        let (_, _, mut state) = second_batch(17);
        for i in 8..15 {
            state = match_pair(state, &format!("p{i}")).0;
        }
        let t = click(state, "p15", Role::Word);
        let t = click(t.state, "p15", Role::Definition);
        let timer = clear_timer(&t);
        let t = apply_tick(t.state, timer, DELAY);
        assert_eq!(t.state.phase(), Phase::Advancing);
        let advance = clear_timer(&t);

        let t = apply_retreat(t.state);
        assert_eq!(t.outcome, Outcome::BatchRetreated { batch_index: 0 });

        let t = apply_tick(t.state, advance, DELAY);
        assert_eq!(t.outcome, Outcome::Stale);
        assert!(t.commands.is_empty());
        assert_eq!(t.state.batches().current(), 0);
        assert_eq!(t.state.phase(), Phase::Playing);
    }

    #[test]
    fn retreat_starts_batch_over() {
        let (_, _, mut state) = start(10, 8);
        let t = apply_retreat(state);
        assert_eq!(t.outcome, Outcome::Ignored(Rejection::FirstBatch));

        state = t.state;
        for i in 0..8 {
            state = match_pair(state, &format!("p{i}")).0;
        }
        let t = apply_advance(state);
        assert_eq!(t.outcome, Outcome::BatchAdvanced { batch_index: 1 });
        let t = apply_advance(t.state);
        assert_eq!(t.outcome, Outcome::Ignored(Rejection::LastBatch));

        let t = apply_retreat(t.state);
        assert_eq!(t.outcome, Outcome::BatchRetreated { batch_index: 0 });
        assert_eq!(t.commands, vec![Command::RebuildDeck { batch_index: 0 }]);
        assert!(t.state.matched().is_empty());
        assert_eq!(t.state.phase(), Phase::Playing);
    }

    #[test]
    fn role_gated_interruption_drops_pending_clear() {
        let (_, _, state) = start(4, 8);
        let w0 = card_id(&state, "p0", Role::Word);
        let d1 = card_id(&state, "p1", Role::Definition);
        let w2 = card_id(&state, "p2", Role::Word);

        let t = apply_select(state, &w0, Discipline::RoleGated, DELAY);
        let t = apply_select(t.state, &d1, Discipline::RoleGated, DELAY);
        assert_eq!(t.outcome, Outcome::Mismatched);
        let timer = clear_timer(&t);

        let t = apply_select(t.state, &w2, Discipline::RoleGated, DELAY);
        assert_eq!(t.outcome, Outcome::Selected);

        let t = apply_tick(t.state, timer, DELAY);
        assert_eq!(t.outcome, Outcome::Stale);
        assert!(t.state.is_selected(&w2));
    }

    #[test]
    fn role_gated_second_definition_is_evaluated() {
        let (_, _, state) = start(4, 8);
        let w0 = card_id(&state, "p0", Role::Word);
        let d0 = card_id(&state, "p0", Role::Definition);
        let d1 = card_id(&state, "p1", Role::Definition);

        let t = apply_select(state, &w0, Discipline::RoleGated, DELAY);
        let t = apply_select(t.state, &d1, Discipline::RoleGated, DELAY);
        assert_eq!(t.outcome, Outcome::Mismatched);
        let first_clear = clear_timer(&t);

        let t = apply_select(t.state, &d0, Discipline::RoleGated, DELAY);
        assert_eq!(t.outcome, Outcome::Matched { pair_id: "p0".to_string() });
        assert!(!t.state.is_selected(&d1));
        let second_clear = clear_timer(&t);

        let t = apply_tick(t.state, first_clear, DELAY);
        assert_eq!(t.outcome, Outcome::Stale);
        assert!(t.state.is_selected(&d0));

        let t = apply_tick(t.state, second_clear, DELAY);
        assert_eq!(t.outcome, Outcome::SelectionCleared);
        assert!(t.state.selection().is_empty());
    }

    #[test]
    fn role_gated_matched_pair_stays_locked() {
        let (_, _, state) = start(4, 8);
        let w0 = card_id(&state, "p0", Role::Word);
        let d0 = card_id(&state, "p0", Role::Definition);
        let d1 = card_id(&state, "p1", Role::Definition);

        let t = apply_select(state, &w0, Discipline::RoleGated, DELAY);
        let t = apply_select(t.state, &d0, Discipline::RoleGated, DELAY);
        let t = apply_select(t.state, &d1, Discipline::RoleGated, DELAY);
        assert_eq!(t.outcome, Outcome::Ignored(Rejection::Resolving));
    }

    #[test]
    fn progress_tracks_matches() {
        let (_, _, state) = start(4, 8);
        assert_eq!(state.batch_info().progress, 0.0);
        let (state, _) = match_pair(state, "p0");
        let (state, _) = match_pair(state, "p1");
        assert_eq!(state.batch_info().progress, 0.5);
        assert_eq!(state.batch_info().total_batches, 1);
    }
}
