//! In-memory snapshot store.

use std::sync::{PoisonError, RwLock};

use fleet_data::Snapshot;

use crate::ports::{SnapshotStore, SnapshotStoreError};

/// Snapshot store backed by process memory.
///
/// Publication is a single slot swap behind a read-write lock, so readers
/// see either the previous snapshot or the new one, never a mixture. Useful
/// as the storage collaborator in tests and embedded deployments.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    slot: RwLock<Option<Snapshot>>,
}

impl MemorySnapshotStore {
    /// Creates an empty store; `load` reports `Missing` until the first
    /// `replace`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn replace(&self, snapshot: &Snapshot) -> Result<(), SnapshotStoreError> {
        let mut guard = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(snapshot.clone());
        Ok(())
    }

    fn load(&self) -> Result<Snapshot, SnapshotStoreError> {
        let guard = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        guard.clone().ok_or(SnapshotStoreError::Missing)
    }
}

#[cfg(test)]
mod tests {
    use fleet_data::{GenerationConfig, generate};

    use super::*;

    fn sample_snapshot(seed: u64) -> Snapshot {
        let config = GenerationConfig {
            seed,
            user_count: 2,
            machine_count: 2,
            purchase_count: 4,
            feedback_count: 4,
            ..GenerationConfig::default()
        };
        generate(&config).expect("generation succeeds")
    }

    #[test]
    fn load_before_publish_reports_missing() {
        let store = MemorySnapshotStore::new();
        assert_eq!(store.load(), Err(SnapshotStoreError::Missing));
    }

    #[test]
    fn replace_then_load_round_trips() {
        let store = MemorySnapshotStore::new();
        let snapshot = sample_snapshot(1);

        store.replace(&snapshot).expect("replace succeeds");
        assert_eq!(store.load().expect("load succeeds"), snapshot);
    }

    #[test]
    fn replace_fully_supersedes_the_previous_snapshot() {
        let store = MemorySnapshotStore::new();
        let first = sample_snapshot(1);
        let second = sample_snapshot(2);

        store.replace(&first).expect("replace succeeds");
        store.replace(&second).expect("replace succeeds");

        assert_eq!(store.load().expect("load succeeds"), second);
    }
}
