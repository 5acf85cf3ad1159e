//! Delayed actions.

use std::time::Duration;

/// A one-shot delayed action, handed back to the session when it elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// Clear the resolved selection.
    ClearSelection { generation: u64, token: u64 },
    /// Move on from a fully matched batch.
    AdvanceBatch { generation: u64 },
}

/// Runs timers. Implementations call [`super::Session::tick`] (or feed
/// [`super::apply_tick`]) once `delay` has passed.
pub trait Scheduler {
    fn after(&mut self, delay: Duration, timer: Timer);

    /// Drop every pending timer. Timers that slip through anyway are
    /// rejected as stale by the session.
    fn cancel_all(&mut self) {}
}

#[derive(Debug, Clone)]
struct Pending {
    due: Duration,
    seq: u64,
    timer: Timer,
}

/// Virtual clock driven by hand. Nothing happens until the caller pops timers.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    now: Duration,
    seq: u64,
    pending: Vec<Pending>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers not yet popped.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Remove the earliest timer due at or before `until`, moving the clock
    /// to its due time. Ties go to the timer scheduled first.
    pub fn pop_due(&mut self, until: Duration) -> Option<Timer> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= until)
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(idx, _)| idx)?;

        let pending = self.pending.remove(idx);
        self.now = self.now.max(pending.due);
        Some(pending.timer)
    }

    /// Move the clock forward without popping anything.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl Scheduler for ManualScheduler {
    fn after(&mut self, delay: Duration, timer: Timer) {
        self.pending.push(Pending {
            due: self.now + delay,
            seq: self.seq,
            timer,
        });
        self.seq += 1;
    }

    fn cancel_all(&mut self) {
        self.pending.clear();
    }
}
