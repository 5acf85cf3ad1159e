//! Session completion.

use crate::batch::BatchScheduler;

/// Whether `matched` pairs finish the whole session: the last batch is in
/// play and every pair in it is matched.
pub fn is_complete(batches: &BatchScheduler, matched: usize) -> bool {
    batches.is_last() && batches.is_cleared(matched)
}

/// Holds the "game complete" callback.
///
/// The session only asks it to fire on the transition into the complete
/// phase, so the callback runs once per play-through.
#[derive(Default)]
pub struct CompletionNotifier {
    callback: Option<Box<dyn FnMut() + Send>>,
}

impl std::fmt::Debug for CompletionNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionNotifier")
            .field("registered", &self.callback.is_some())
            .finish()
    }
}

impl CompletionNotifier {
    pub fn new(callback: impl FnMut() + Send + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    pub fn notify(&mut self) {
        if let Some(callback) = self.callback.as_mut() {
            callback();
        }
    }
}
