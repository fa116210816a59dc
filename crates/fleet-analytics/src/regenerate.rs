//! Snapshot regeneration orchestration.
//!
//! Ties the generator to the storage port: build the new snapshot fully off
//! to the side, re-check its integrity, then publish it in one step. Any
//! failure aborts before publication, so readers keep the prior snapshot.

use fleet_data::{
    ConfigError, GenerationConfig, IntegrityError, Snapshot, generate, validate_snapshot,
};
use thiserror::Error;
use tracing::info;

use crate::ports::{SnapshotStore, SnapshotStoreError};

/// Errors raised while regenerating the dataset.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegenerateError {
    /// The configuration was rejected before generation.
    #[error("invalid generation configuration: {0}")]
    Config(#[from] ConfigError),

    /// The generated snapshot failed the integrity re-check.
    #[error("generated snapshot failed integrity validation: {0}")]
    Integrity(#[from] IntegrityError),

    /// Publication through the store failed.
    #[error("snapshot publication failed: {0}")]
    Store(#[from] SnapshotStoreError),
}

/// Regenerates the dataset and publishes it through the store.
///
/// The previous snapshot is fully replaced, never merged. On any error the
/// store is left untouched and prior data stays intact.
///
/// # Errors
///
/// Returns [`RegenerateError`] when the configuration is invalid, the
/// generated snapshot fails validation, or the store cannot publish it.
pub fn regenerate<S>(config: &GenerationConfig, store: &S) -> Result<Snapshot, RegenerateError>
where
    S: SnapshotStore + ?Sized,
{
    let snapshot = generate(config)?;
    validate_snapshot(&snapshot, config.stocking.max_quantity)?;
    store.replace(&snapshot)?;

    info!(
        seed = config.seed,
        users = snapshot.users.len(),
        machines = snapshot.machines.len(),
        inventory = snapshot.inventory.len(),
        purchases = snapshot.purchases.len(),
        feedback = snapshot.feedback.len(),
        "fleet snapshot regenerated"
    );

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockSnapshotStore;
    use crate::store::MemorySnapshotStore;

    fn config() -> GenerationConfig {
        GenerationConfig {
            seed: 11,
            user_count: 3,
            machine_count: 2,
            purchase_count: 5,
            feedback_count: 6,
            ..GenerationConfig::default()
        }
    }

    #[test]
    fn publishes_the_generated_snapshot() {
        let mut store = MockSnapshotStore::new();
        store.expect_replace().times(1).returning(|_| Ok(()));

        let snapshot = regenerate(&config(), &store).expect("regeneration succeeds");
        assert_eq!(snapshot.machines.len(), 2);
    }

    #[test]
    fn invalid_configuration_never_touches_the_store() {
        let store = MockSnapshotStore::new();
        let invalid = GenerationConfig {
            user_count: 0,
            ..config()
        };

        // No expectation is set on the mock: any store call would panic.
        let result = regenerate(&invalid, &store);
        assert!(matches!(result, Err(RegenerateError::Config(_))));
    }

    #[test]
    fn store_failures_propagate() {
        let mut store = MockSnapshotStore::new();
        store
            .expect_replace()
            .returning(|_| Err(SnapshotStoreError::io("/tmp/x", "disk full")));

        let result = regenerate(&config(), &store);
        assert!(matches!(result, Err(RegenerateError::Store(_))));
    }

    #[test]
    fn failed_regeneration_leaves_prior_data_intact() {
        let store = MemorySnapshotStore::new();
        let published = regenerate(&config(), &store).expect("first regeneration succeeds");

        let invalid = GenerationConfig {
            user_count: 0,
            ..config()
        };
        let result = regenerate(&invalid, &store);
        assert!(result.is_err());

        assert_eq!(store.load().expect("prior snapshot loads"), published);
    }
}
