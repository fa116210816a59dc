//! Deterministic vending fleet snapshot generation.
//!
//! This crate produces referentially consistent synthetic datasets for a
//! small network of vending machines: users, a priced item catalog,
//! geo-placed machines, per-machine inventory, purchase history and
//! customer feedback. The same [`GenerationConfig`] always produces an
//! identical [`Snapshot`], so downstream analytics are reproducible.
//!
//! # Overview
//!
//! - One explicit configuration value; every field defaults independently
//! - Seeded ChaCha8 randomness with weighted categorical sampling
//! - Generation in dependency order, so foreign keys always resolve
//! - Defence-in-depth integrity validation for snapshots from other paths
//!
//! # Example
//!
//! ```
//! use fleet_data::{GenerationConfig, generate, validate_snapshot};
//!
//! let config = GenerationConfig {
//!     seed: 7,
//!     user_count: 3,
//!     machine_count: 2,
//!     ..GenerationConfig::default()
//! };
//!
//! let snapshot = generate(&config).expect("generation succeeds");
//! assert_eq!(snapshot.machines.len(), 2);
//! assert!(validate_snapshot(&snapshot, config.stocking.max_quantity).is_ok());
//! ```

mod config;
mod entities;
mod error;
mod generator;
mod snapshot;
mod validation;

pub use config::{
    CatalogEntry, CreditRange, FeedbackMix, GenerationConfig, GeoConfig, StockingConfig,
    TimeWindow,
};
pub use entities::{
    Accessibility, FeedbackEntry, FeedbackId, FeedbackKind, InventoryRecord, Item, ItemCategory,
    ItemId, Machine, MachineId, Purchase, PurchaseId, Timestamp, TimestampParseError, User,
    UserId,
};
pub use error::{ConfigError, IntegrityError};
pub use generator::generate;
pub use snapshot::Snapshot;
pub use validation::validate_snapshot;
