//! Error types for snapshot generation.
//!
//! Two semantic enums: [`ConfigError`] for impossible generation parameters
//! (rejected before anything is produced) and [`IntegrityError`] for
//! cross-table violations that should be unreachable through the public
//! generator contract.

use thiserror::Error;

use crate::entities::{ItemId, MachineId, Timestamp, UserId};

/// Invalid or impossible generation parameters.
///
/// Validation runs before any entity is generated; a configuration that
/// fails here aborts the run with no partial snapshot produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// More distinct items were requested per machine than the catalog holds.
    #[error("inventory density {requested} exceeds catalog size {available}")]
    DensityExceedsCatalog {
        /// Requested maximum distinct items per machine.
        requested: usize,
        /// Number of catalog entries available to sample from.
        available: usize,
    },

    /// The stocking density range is inverted.
    #[error("stocking density range is inverted: min {min} > max {max}")]
    InvalidStockingRange {
        /// Configured minimum distinct items per machine.
        min: usize,
        /// Configured maximum distinct items per machine.
        max: usize,
    },

    /// Two catalog entries share a name.
    #[error("catalog contains duplicate item name '{name}'")]
    DuplicateCatalogName {
        /// The duplicated item name.
        name: String,
    },

    /// A catalog entry has a zero or negative price.
    #[error("catalog item '{name}' must have a positive price")]
    NonPositivePrice {
        /// The offending item name.
        name: String,
    },

    /// The time window ends before it starts.
    #[error("time window is inverted: {start} > {end}")]
    InvalidTimeWindow {
        /// Configured window start.
        start: Timestamp,
        /// Configured window end.
        end: Timestamp,
    },

    /// The credit range is inverted.
    #[error("credit range is inverted: min {min} > max {max}")]
    InvalidCreditRange {
        /// Configured minimum balance.
        min: i64,
        /// Configured maximum balance.
        max: i64,
    },

    /// Both feedback weights are zero while feedback is requested.
    #[error("feedback weighting requires at least one non-zero weight")]
    ZeroFeedbackWeights,

    /// A dependent table would draw from an empty pool.
    #[error("cannot generate {table}: the {pool} pool is empty")]
    EmptyPool {
        /// The empty source pool.
        pool: &'static str,
        /// The table that would reference it.
        table: &'static str,
    },

    /// The geographic centre is off the globe.
    #[error("geographic centre {field} {value} is out of range")]
    InvalidGeoCenter {
        /// The offending coordinate field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The coordinate jitter is negative or not finite.
    #[error("coordinate jitter {value} must be finite and non-negative")]
    InvalidJitter {
        /// The rejected value.
        value: f64,
    },
}

/// A cross-table invariant violation found in a snapshot.
///
/// The generator's ordering makes these unreachable through [`crate::generate`];
/// the check exists for snapshots arriving through other paths.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    /// A row references a machine that does not exist.
    #[error("{table} row references unknown machine {id}")]
    DanglingMachine {
        /// Table containing the dangling reference.
        table: &'static str,
        /// The unresolved machine id.
        id: MachineId,
    },

    /// A row references an item that does not exist.
    #[error("{table} row references unknown item {id}")]
    DanglingItem {
        /// Table containing the dangling reference.
        table: &'static str,
        /// The unresolved item id.
        id: ItemId,
    },

    /// A row references a user that does not exist.
    #[error("{table} row references unknown user {id}")]
    DanglingUser {
        /// Table containing the dangling reference.
        table: &'static str,
        /// The unresolved user id.
        id: UserId,
    },

    /// Two inventory rows share a (machine, item) key.
    #[error("duplicate inventory row for machine {machine_id} and item {item_id}")]
    DuplicateInventory {
        /// Machine half of the duplicated key.
        machine_id: MachineId,
        /// Item half of the duplicated key.
        item_id: ItemId,
    },

    /// Two catalog items share a name.
    #[error("duplicate item name '{name}' in catalog")]
    DuplicateItemName {
        /// The duplicated name.
        name: String,
    },

    /// Two machines share an address label.
    #[error("duplicate machine address '{address}' in fleet")]
    DuplicateAddress {
        /// The duplicated address label.
        address: String,
    },

    /// An inventory quantity exceeds the configured maximum.
    #[error("inventory quantity {quantity} for machine {machine_id} exceeds maximum {max}")]
    QuantityOutOfRange {
        /// Machine holding the slot.
        machine_id: MachineId,
        /// Item in the slot.
        item_id: ItemId,
        /// The out-of-range quantity.
        quantity: u32,
        /// The configured upper bound.
        max: u32,
    },
}
