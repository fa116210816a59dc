//! Snapshot storage port.
//!
//! The analytics engine does not assume a file format or database engine;
//! it only requires that the full set of entity tables can be replaced and
//! read as one unit. Two adapters ship with the crate:
//! [`crate::MemorySnapshotStore`] and [`crate::JsonSnapshotStore`].

use fleet_data::Snapshot;
use thiserror::Error;

/// Errors raised by snapshot store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotStoreError {
    /// Underlying I/O failed.
    #[error("snapshot store I/O failed at '{path}': {message}")]
    Io {
        /// Path or resource the adapter was touching.
        path: String,
        /// Description of the failure.
        message: String,
    },

    /// The snapshot could not be serialised or deserialised.
    #[error("snapshot serialisation failed: {message}")]
    Serialisation {
        /// Description of the failure.
        message: String,
    },

    /// No snapshot has been published yet.
    #[error("no snapshot has been published")]
    Missing,
}

impl SnapshotStoreError {
    /// Builds an I/O error from any displayable parts.
    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Builds a serialisation error from any displayable message.
    pub fn serialisation(message: impl Into<String>) -> Self {
        Self::Serialisation {
            message: message.into(),
        }
    }
}

/// Port for persisting and reading snapshots as one atomic unit.
///
/// Implementations must publish by swap: `replace` builds the new state
/// fully off to the side and makes it visible in a single step, so a
/// concurrent or subsequent `load` never observes a partially written
/// snapshot. A failed `replace` leaves the prior snapshot intact.
#[cfg_attr(test, mockall::automock)]
pub trait SnapshotStore: Send + Sync {
    /// Replaces all tables with the given snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError`] when the snapshot cannot be written.
    fn replace(&self, snapshot: &Snapshot) -> Result<(), SnapshotStoreError>;

    /// Reads all tables as one snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError::Missing`] when nothing has been
    /// published, or another variant when the stored data cannot be read.
    fn load(&self) -> Result<Snapshot, SnapshotStoreError>;
}
