//! Process-wide request counter.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonically increasing tally shared by every request handler.
///
/// Starts at zero, is never reset and is not persisted across restarts.
#[derive(Debug, Default)]
pub struct RequestCounter {
    count: AtomicU64,
}

impl RequestCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds exactly one to the tally.
    pub fn increment(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }

    pub fn read(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }
}
