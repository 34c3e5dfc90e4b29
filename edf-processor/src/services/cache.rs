//! In-memory snapshot cache
//!
//! Holds the current set of scanned recordings behind a lock that guards
//! only an `Arc` swap. Readers clone the `Arc` and iterate without the
//! lock, so a rescan replaces the whole snapshot atomically and no
//! reader ever observes a partially updated set.

use std::sync::{Arc, RwLock};

use edf_common::model::RecordingFile;

/// The full, immutable set of records produced by one scan
pub type Snapshot = Vec<RecordingFile>;

/// Atomically replaceable snapshot holder
pub struct SnapshotCache {
    current: RwLock<Arc<Snapshot>>,
}

impl SnapshotCache {
    /// Create a cache holding an empty snapshot
    pub fn new() -> SnapshotCache {
        SnapshotCache {
            current: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Substitute the whole snapshot. Readers holding the previous
    /// snapshot keep it alive until they drop their `Arc`.
    pub fn replace(&self, snapshot: Snapshot) {
        let snapshot = Arc::new(snapshot);
        *self.current.write().unwrap() = snapshot;
    }

    /// Shared read-only view of the current snapshot
    pub fn current(&self) -> Arc<Snapshot> {
        self.current.read().unwrap().clone()
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new()
    }
}
