//! Thread-safe holder of the latest published timer snapshot.
//!
//! [`SharedStateStore`] is the only shared-memory boundary in the
//! system: the scheduler task publishes into it once per state-affecting
//! event, and HTTP handlers read from it once per inbound request.
//! The lock is held only for clone-in/clone-out -- never across network
//! or rendering I/O -- so neither side can block the other for longer
//! than the brief critical section.

use std::sync::Arc;

use podium_types::TimerSnapshot;
use tokio::sync::RwLock;

/// Shared snapshot store with a single logical writer (the scheduler)
/// and any number of concurrent readers (the poll endpoint).
///
/// Cloning the store is cheap and yields a handle to the same snapshot.
#[derive(Debug, Clone)]
pub struct SharedStateStore {
    inner: Arc<RwLock<TimerSnapshot>>,
}

impl SharedStateStore {
    /// Create a store holding the default "no speaker" snapshot.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(TimerSnapshot::default())),
        }
    }

    /// Replace the stored snapshot.
    ///
    /// The snapshot is fully formed before this call, so the store
    /// transitions atomically from one consistent view to the next;
    /// readers never observe a write in progress.
    pub async fn publish(&self, snapshot: TimerSnapshot) {
        let mut guard = self.inner.write().await;
        *guard = snapshot;
    }

    /// Return an independent copy of the current snapshot.
    pub async fn read(&self) -> TimerSnapshot {
        self.inner.read().await.clone()
    }
}

impl Default for SharedStateStore {
    fn default() -> Self {
        Self::new()
    }
}
