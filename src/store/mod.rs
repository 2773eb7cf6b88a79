pub mod snapshot;

use crate::core::SchemeRecord;
use crate::feed::ParsedFeed;
use chrono::Utc;
use snapshot::Snapshot;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// Holds the latest parsed snapshot of the feed.
///
/// Readers take a cheap `Arc` clone of the current snapshot and keep reading
/// it even while a writer installs a newer one, so a reader never observes a
/// partially replaced store.
pub struct FundStore {
    current: RwLock<Arc<Snapshot>>,
}

impl FundStore {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(Snapshot::empty())),
        }
    }

    /// The snapshot installed most recently.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        // The guarded value is a plain `Arc`, poisoning cannot leave it half-written.
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Discards the previous snapshot and installs `feed` as the next version.
    pub fn replace(&self, feed: ParsedFeed) -> Arc<Snapshot> {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let next = Arc::new(Snapshot::new(current.version() + 1, Utc::now(), feed));
        info!(
            version = next.version(),
            records = next.len(),
            groups = next.groups().len(),
            "Installed new NAV snapshot"
        );
        *current = Arc::clone(&next);
        next
    }

    pub fn get(&self, serial_number: u32) -> Option<SchemeRecord> {
        self.snapshot().get(serial_number).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}

impl Default for FundStore {
    fn default() -> Self {
        Self::new()
    }
}
