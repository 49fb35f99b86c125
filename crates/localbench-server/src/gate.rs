use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Admits at most one model invocation at a time.
///
/// Submissions that arrive while one is running are turned away rather than
/// queued. The slot frees itself when the returned permit is dropped, on
/// success and failure alike.
#[derive(Debug, Clone)]
pub struct AnalysisGate {
    slot: Arc<Semaphore>,
}

impl AnalysisGate {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Semaphore::new(1)),
        }
    }

    /// Claims the slot, or returns `None` if an analysis is already running.
    pub fn try_enter(&self) -> Option<OwnedSemaphorePermit> {
        Arc::clone(&self.slot).try_acquire_owned().ok()
    }

    pub fn is_busy(&self) -> bool {
        self.slot.available_permits() == 0
    }
}

impl Default for AnalysisGate {
    fn default() -> Self {
        Self::new()
    }
}
