use crate::types::ScanResult;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct SinkState {
    entries: Vec<ScanResult>,
    cancelled: bool,
}

/// Shared accumulator for results coming back from concurrent workers.
///
/// The entry list and the cancellation flag sit behind one lock, so a record
/// either lands before `cancel()` or is refused after it. Entries are only
/// reachable through `drain()`.
#[derive(Debug, Default)]
pub struct ResultSink {
    state: Mutex<SinkState>,
}

impl ResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `result` unless the sink has been cancelled. Returns whether it was kept.
    pub fn record(&self, result: ScanResult) -> bool {
        let mut state = self.lock();
        if state.cancelled {
            return false;
        }
        state.entries.push(result);
        true
    }

    /// Refuse all further records. Idempotent; keeps what was already recorded.
    pub fn cancel(&self) {
        self.lock().cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.lock().cancelled
    }

    /// Every recorded entry, sorted ascending by port.
    ///
    /// Call only once all workers have been joined. Entries stay in the sink,
    /// so `open_count` keeps describing the same set afterwards.
    pub fn drain(&self) -> Vec<ScanResult> {
        let mut state = self.lock();
        state.entries.sort_by_key(|r| r.port);
        state.entries.clone()
    }

    /// Number of open entries among those `drain` returns.
    pub fn open_count(&self) -> usize {
        self.lock().entries.iter().filter(|r| r.is_open).count()
    }

    // A worker that panicked while holding the lock cannot leave the state
    // half-written, so a poisoned guard is still usable.
    fn lock(&self) -> MutexGuard<'_, SinkState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
