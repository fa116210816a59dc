//! Operational analytics for the vending fleet.
//!
//! This crate consumes the snapshots produced by `fleet-data` and derives
//! the views the presentation layer displays: fleet summary metrics, demand
//! and sales rankings, maintenance priorities, per-machine drill-downs,
//! customer search, and low-stock reporting. Queries are pure functions of
//! a snapshot; repeated calls against an unchanged snapshot return
//! identical results, including ordering.
//!
//! Snapshot persistence goes through the [`SnapshotStore`] port. Two
//! adapters ship with the crate — an in-memory store and a JSON file store —
//! and both publish by atomic swap, so readers never observe a partially
//! written snapshot. [`regenerate`] ties generation, integrity validation
//! and publication together.
//!
//! # Example
//!
//! ```
//! use fleet_analytics::{MemorySnapshotStore, SearchFilter, fleet_summary, regenerate,
//!     search_machines};
//! use fleet_data::GenerationConfig;
//!
//! let store = MemorySnapshotStore::new();
//! let config = GenerationConfig {
//!     machine_count: 4,
//!     ..GenerationConfig::default()
//! };
//!
//! let snapshot = regenerate(&config, &store).expect("regeneration succeeds");
//! let summary = fleet_summary(&snapshot);
//! assert_eq!(summary.machine_count, 4);
//!
//! // The empty filter is a no-op and returns the full fleet.
//! let hits = search_machines(&snapshot, &SearchFilter::default());
//! assert_eq!(hits.len(), 4);
//! ```

mod error;
mod ports;
mod rankings;
mod regenerate;
mod report;
mod search;
mod stock;
mod store;
mod summary;

pub use error::QueryError;
pub use ports::{SnapshotStore, SnapshotStoreError};
pub use rankings::{
    DEFAULT_MAINTENANCE_LIMIT, MaintenancePriority, RankedItem, demand_ranking,
    maintenance_priority, sales_ranking,
};
pub use regenerate::{RegenerateError, regenerate};
pub use report::{MachineReport, StockLine, machine_report};
pub use search::{BoundingBox, GeoValidationError, SearchFilter, search_machines};
pub use stock::{DEFAULT_LOW_STOCK_THRESHOLD, LowStockLine, fleet_stock_health, low_stock_report};
pub use store::{JsonSnapshotStore, MemorySnapshotStore};
pub use summary::{FleetSummary, fleet_summary};
