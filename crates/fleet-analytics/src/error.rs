//! Query error types.

use fleet_data::MachineId;
use thiserror::Error;

/// Errors raised by snapshot queries.
///
/// A query that legitimately matches zero rows returns an empty sequence,
/// not an error; this enum covers lookups against ids that do not exist in
/// the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The requested machine id is absent from the snapshot.
    #[error("machine {id} not found in snapshot")]
    MachineNotFound {
        /// The unresolved machine id.
        id: MachineId,
    },
}
