//! Tokio-backed timers.

use std::time::Duration;

use match_core::{Scheduler, Timer};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Sleeps on the tokio runtime and sends each elapsed timer back to the event loop.
pub struct TokioScheduler {
    tx: UnboundedSender<Timer>,
    tasks: Vec<JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new(tx: UnboundedSender<Timer>) -> Self {
        Self {
            tx,
            tasks: Vec::new(),
        }
    }

    /// Timers still sleeping.
    pub fn pending(&self) -> usize {
        self.tasks.iter().filter(|t| !t.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    fn after(&mut self, delay: Duration, timer: Timer) {
        self.tasks.retain(|t| !t.is_finished());

        let tx = self.tx.clone();
        self.tasks.push(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the player is shutting down.
            let _ = tx.send(timer);
        }));
    }

    fn cancel_all(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
