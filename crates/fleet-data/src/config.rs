//! Generation configuration.
//!
//! One explicit configuration value parameterises a generation run. Every
//! field defaults independently, so callers can override a single knob in
//! JSON without restating the rest; nothing here is a hidden process-wide
//! default baked into generation logic. The default vocabularies mirror the
//! fleet the simulation was modelled on.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::entities::{ItemCategory, Timestamp};
use crate::error::ConfigError;

/// One row of the static item catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Item name, unique within the catalog.
    pub name: String,
    /// Catalog category.
    pub category: ItemCategory,
    /// Positive unit price.
    pub price: Decimal,
}

impl CatalogEntry {
    /// Convenience constructor for catalog literals.
    #[must_use]
    pub fn new(name: &str, category: ItemCategory, price: Decimal) -> Self {
        Self {
            name: name.to_owned(),
            category,
            price,
        }
    }
}

/// Geographic placement of the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeoConfig {
    /// Latitude of the fleet centre in decimal degrees.
    pub center_lat: f64,
    /// Longitude of the fleet centre in decimal degrees.
    pub center_lng: f64,
    /// Maximum uniform offset applied to each coordinate, in degrees.
    pub jitter_degrees: f64,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            center_lat: 42.727,
            center_lng: -84.481,
            jitter_degrees: 0.008,
        }
    }
}

/// Inventory density and stock bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StockingConfig {
    /// Minimum distinct items stocked per machine.
    pub min_items_per_machine: usize,
    /// Maximum distinct items stocked per machine.
    pub max_items_per_machine: usize,
    /// Upper bound for a slot quantity; quantities are uniform in `[0, max]`.
    pub max_quantity: u32,
}

impl Default for StockingConfig {
    fn default() -> Self {
        Self {
            min_items_per_machine: 2,
            max_items_per_machine: 5,
            max_quantity: 10,
        }
    }
}

/// Categorical weighting of generated feedback kinds.
///
/// Weights are relative, not percentages: the default `7:3` mix draws
/// roughly 70% requests and 30% issues, matching the skew observed in the
/// modelled fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeedbackMix {
    /// Relative weight of request feedback.
    pub request_weight: u32,
    /// Relative weight of issue feedback.
    pub issue_weight: u32,
}

impl Default for FeedbackMix {
    fn default() -> Self {
        Self {
            request_weight: 7,
            issue_weight: 3,
        }
    }
}

/// Inclusive window that historical timestamps are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimeWindow {
    /// Earliest generated instant.
    pub start: Timestamp,
    /// Latest generated instant.
    pub end: Timestamp,
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self {
            start: Timestamp::from_ymd_hm(2026, 1, 1, 0, 0).unwrap_or_default(),
            end: Timestamp::from_ymd_hm(2026, 1, 31, 23, 59).unwrap_or_default(),
        }
    }
}

/// Inclusive bounds for seeded user credit balances, in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreditRange {
    /// Smallest seeded balance.
    pub min: i64,
    /// Largest seeded balance.
    pub max: i64,
}

impl Default for CreditRange {
    fn default() -> Self {
        Self { min: 0, max: 5000 }
    }
}

/// Parameters for one generation run.
///
/// # Example
///
/// ```
/// use fleet_data::GenerationConfig;
///
/// let config: GenerationConfig =
///     serde_json::from_str(r#"{"seed": 7, "machineCount": 3}"#).expect("valid config");
/// assert_eq!(config.seed, 7);
/// assert_eq!(config.machine_count, 3);
/// // Unstated fields keep their defaults.
/// assert!(!config.catalog.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationConfig {
    /// RNG seed; identical configurations produce identical snapshots.
    pub seed: u64,
    /// Number of users to create.
    pub user_count: usize,
    /// Number of machines to create.
    pub machine_count: usize,
    /// Number of historical purchases to create.
    pub purchase_count: usize,
    /// Number of feedback entries to create.
    pub feedback_count: usize,
    /// The static item catalog for the run.
    pub catalog: Vec<CatalogEntry>,
    /// Fleet centre and coordinate jitter.
    pub geo: GeoConfig,
    /// Inventory density and stock bounds.
    pub stocking: StockingConfig,
    /// Request/issue weighting for feedback.
    pub feedback_mix: FeedbackMix,
    /// Window for historical timestamps.
    pub time_window: TimeWindow,
    /// Bounds for seeded credit balances.
    pub credit_range: CreditRange,
    /// Display labels machines draw their addresses from; reuse is
    /// disambiguated with a sequence suffix.
    pub location_labels: Vec<String>,
    /// Fault descriptions issue feedback draws from.
    pub issue_vocabulary: Vec<String>,
    /// Products requestable beyond the catalog.
    pub request_extras: Vec<String>,
    /// Free-text accessibility preferences users draw from.
    pub accessibility_preferences: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: 2026,
            user_count: 25,
            machine_count: 12,
            purchase_count: 120,
            feedback_count: 100,
            catalog: default_catalog(),
            geo: GeoConfig::default(),
            stocking: StockingConfig::default(),
            feedback_mix: FeedbackMix::default(),
            time_window: TimeWindow::default(),
            credit_range: CreditRange::default(),
            location_labels: to_owned_list(&[
                "Engineering Hall",
                "Main Library",
                "IM West Gym",
                "Business College",
                "Spartan Stadium",
                "Union Building",
                "Chemistry Building",
                "Wells Hall",
                "Case Hall",
            ]),
            issue_vocabulary: to_owned_list(&[
                "Scanner too high",
                "Out of change",
                "Stuck item",
                "Screen flickering",
                "Card reader error",
            ]),
            request_extras: to_owned_list(&[
                "Oatmilk Latte",
                "Yerba Mate",
                "Gluten Free Cookies",
                "Hot Cheetos",
                "Red Bull",
            ]),
            accessibility_preferences: to_owned_list(&[
                "None",
                "Highlight items",
                "Large text",
                "Audio prompts",
            ]),
        }
    }
}

impl GenerationConfig {
    /// Checks the configuration for impossible generation parameters.
    ///
    /// Called by the generator before anything is produced, so a failed run
    /// publishes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the catalog is malformed, the requested
    /// inventory density exceeds the catalog size, the time window or a
    /// numeric range is inverted, the geographic centre is off the globe, or
    /// a dependent table would draw from an empty pool.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_catalog()?;
        self.validate_stocking()?;
        self.validate_geo()?;
        self.validate_window_and_ranges()?;
        self.validate_pools()
    }

    fn validate_catalog(&self) -> Result<(), ConfigError> {
        let mut seen = std::collections::HashSet::new();
        for entry in &self.catalog {
            if !seen.insert(entry.name.as_str()) {
                return Err(ConfigError::DuplicateCatalogName {
                    name: entry.name.clone(),
                });
            }
            if entry.price <= Decimal::ZERO {
                return Err(ConfigError::NonPositivePrice {
                    name: entry.name.clone(),
                });
            }
        }
        Ok(())
    }

    fn validate_stocking(&self) -> Result<(), ConfigError> {
        let stocking = &self.stocking;
        if stocking.min_items_per_machine > stocking.max_items_per_machine {
            return Err(ConfigError::InvalidStockingRange {
                min: stocking.min_items_per_machine,
                max: stocking.max_items_per_machine,
            });
        }
        if self.machine_count > 0 && stocking.max_items_per_machine > self.catalog.len() {
            return Err(ConfigError::DensityExceedsCatalog {
                requested: stocking.max_items_per_machine,
                available: self.catalog.len(),
            });
        }
        Ok(())
    }

    fn validate_geo(&self) -> Result<(), ConfigError> {
        let geo = &self.geo;
        if !geo.center_lat.is_finite() || !(-90.0..=90.0).contains(&geo.center_lat) {
            return Err(ConfigError::InvalidGeoCenter {
                field: "center_lat",
                value: geo.center_lat,
            });
        }
        if !geo.center_lng.is_finite() || !(-180.0..=180.0).contains(&geo.center_lng) {
            return Err(ConfigError::InvalidGeoCenter {
                field: "center_lng",
                value: geo.center_lng,
            });
        }
        if !geo.jitter_degrees.is_finite() || geo.jitter_degrees < 0.0 {
            return Err(ConfigError::InvalidJitter {
                value: geo.jitter_degrees,
            });
        }
        Ok(())
    }

    fn validate_window_and_ranges(&self) -> Result<(), ConfigError> {
        if self.time_window.start > self.time_window.end {
            return Err(ConfigError::InvalidTimeWindow {
                start: self.time_window.start,
                end: self.time_window.end,
            });
        }
        if self.credit_range.min > self.credit_range.max {
            return Err(ConfigError::InvalidCreditRange {
                min: self.credit_range.min,
                max: self.credit_range.max,
            });
        }
        Ok(())
    }

    /// Rejects dependent tables whose source pools are empty, so generation
    /// never references rows that cannot exist.
    fn validate_pools(&self) -> Result<(), ConfigError> {
        if self.machine_count > 0 && self.location_labels.is_empty() {
            return Err(ConfigError::EmptyPool {
                pool: "location labels",
                table: "machines",
            });
        }
        if self.purchase_count > 0 {
            if self.user_count == 0 {
                return Err(ConfigError::EmptyPool {
                    pool: "users",
                    table: "purchases",
                });
            }
            if self.machine_count == 0 {
                return Err(ConfigError::EmptyPool {
                    pool: "machines",
                    table: "purchases",
                });
            }
            if self.catalog.is_empty() {
                return Err(ConfigError::EmptyPool {
                    pool: "catalog items",
                    table: "purchases",
                });
            }
        }
        if self.feedback_count > 0 {
            self.validate_feedback_pools()?;
        }
        Ok(())
    }

    fn validate_feedback_pools(&self) -> Result<(), ConfigError> {
        let mix = &self.feedback_mix;
        if mix.request_weight == 0 && mix.issue_weight == 0 {
            return Err(ConfigError::ZeroFeedbackWeights);
        }
        if self.machine_count == 0 {
            return Err(ConfigError::EmptyPool {
                pool: "machines",
                table: "feedback",
            });
        }
        if mix.request_weight > 0 && self.catalog.is_empty() && self.request_extras.is_empty() {
            return Err(ConfigError::EmptyPool {
                pool: "request vocabulary",
                table: "feedback",
            });
        }
        if mix.issue_weight > 0 && self.issue_vocabulary.is_empty() {
            return Err(ConfigError::EmptyPool {
                pool: "issue vocabulary",
                table: "feedback",
            });
        }
        Ok(())
    }
}

/// Default catalog modelled on the original fleet's product mix.
fn default_catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("Dasani Water", ItemCategory::Drink, dec!(1.50)),
        CatalogEntry::new("Coca-Cola", ItemCategory::Drink, dec!(1.75)),
        CatalogEntry::new("Monster Energy", ItemCategory::Drink, dec!(3.25)),
        CatalogEntry::new("Cheez-Its", ItemCategory::Snack, dec!(1.50)),
        CatalogEntry::new("Cool Ranch Doritos", ItemCategory::Snack, dec!(1.75)),
        CatalogEntry::new("Snickers", ItemCategory::Candy, dec!(1.25)),
        CatalogEntry::new("Pop-Tarts", ItemCategory::Candy, dec!(1.50)),
        CatalogEntry::new("Granola Bar", ItemCategory::Health, dec!(2.00)),
        CatalogEntry::new("Protein Bar", ItemCategory::Health, dec!(2.75)),
        CatalogEntry::new("Instant Ramen", ItemCategory::Meal, dec!(2.50)),
    ]
}

fn to_owned_list(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}
