//! Customer-facing machine search.
//!
//! Predicates combine with logical AND; an absent predicate is a no-op, so
//! the empty filter returns the whole fleet. Matching is exact containment,
//! never fuzzy.

use std::collections::HashMap;

use fleet_data::{ItemId, Machine, MachineId, Snapshot};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for geographic bounds.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoValidationError {
    /// A coordinate is not finite or outside its degree range.
    #[error("bounding box {field} {value} is out of range")]
    InvalidCoordinate {
        /// The offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Minimum bounds exceed maximum bounds.
    #[error("bounding box minimum exceeds maximum")]
    InvalidBoundsOrder,
}

/// Geographic bounds for map display, `[min_lng, min_lat, max_lng, max_lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    min_lng: f64,
    min_lat: f64,
    max_lng: f64,
    max_lat: f64,
}

impl BoundingBox {
    /// Creates a validated bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`GeoValidationError`] when a coordinate is off the globe or
    /// the bounds are inverted.
    pub fn new(
        min_lng: f64,
        min_lat: f64,
        max_lng: f64,
        max_lat: f64,
    ) -> Result<Self, GeoValidationError> {
        validate_longitude(min_lng, "min_lng")?;
        validate_latitude(min_lat, "min_lat")?;
        validate_longitude(max_lng, "max_lng")?;
        validate_latitude(max_lat, "max_lat")?;

        if min_lng > max_lng || min_lat > max_lat {
            return Err(GeoValidationError::InvalidBoundsOrder);
        }

        Ok(Self {
            min_lng,
            min_lat,
            max_lng,
            max_lat,
        })
    }

    /// Returns `true` when the point lies inside the box (inclusive).
    #[must_use]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&latitude)
            && (self.min_lng..=self.max_lng).contains(&longitude)
    }

    /// Returns bounds as `[min_lng, min_lat, max_lng, max_lat]`.
    #[must_use]
    pub const fn as_array(self) -> [f64; 4] {
        [self.min_lng, self.min_lat, self.max_lng, self.max_lat]
    }
}

/// Customer search predicates; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchFilter {
    /// Only machines with an assistive fitting.
    pub require_accessible: bool,
    /// Case-insensitive substring matched against in-stock item names.
    pub item_name: Option<String>,
    /// Geographic bounds for map display.
    pub bounds: Option<BoundingBox>,
}

/// Returns the machines satisfying every active predicate.
///
/// The item-name predicate matches machines with at least one in-stock
/// inventory line (quantity above zero) whose item name contains the query,
/// ignoring case. A filter with no active predicates returns the full
/// fleet; a filter nothing satisfies returns an empty vector, not an error.
#[must_use]
pub fn search_machines(snapshot: &Snapshot, filter: &SearchFilter) -> Vec<Machine> {
    let needle = filter.item_name.as_ref().map(|name| name.to_lowercase());
    let stocked_names = needle.as_ref().map(|_| in_stock_names(snapshot));

    snapshot
        .machines
        .iter()
        .filter(|machine| {
            if filter.require_accessible && !machine.accessibility.is_assisted() {
                return false;
            }
            if let Some(bounds) = &filter.bounds {
                if !bounds.contains(machine.latitude, machine.longitude) {
                    return false;
                }
            }
            if let Some(query) = &needle {
                let Some(names) = stocked_names
                    .as_ref()
                    .and_then(|map| map.get(&machine.id))
                else {
                    return false;
                };
                if !names.iter().any(|name| name.contains(query)) {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}

/// Lower-cased names of in-stock items, grouped per machine.
fn in_stock_names(snapshot: &Snapshot) -> HashMap<MachineId, Vec<String>> {
    let item_names: HashMap<ItemId, String> = snapshot
        .items
        .iter()
        .map(|item| (item.id, item.name.to_lowercase()))
        .collect();

    let mut map: HashMap<MachineId, Vec<String>> = HashMap::new();
    for record in &snapshot.inventory {
        if record.quantity == 0 {
            continue;
        }
        if let Some(name) = item_names.get(&record.item_id) {
            map.entry(record.machine_id).or_default().push(name.clone());
        }
    }
    map
}

fn validate_longitude(value: f64, field: &'static str) -> Result<(), GeoValidationError> {
    if !value.is_finite() || !(-180.0..=180.0).contains(&value) {
        return Err(GeoValidationError::InvalidCoordinate { field, value });
    }
    Ok(())
}

fn validate_latitude(value: f64, field: &'static str) -> Result<(), GeoValidationError> {
    if !value.is_finite() || !(-90.0..=90.0).contains(&value) {
        return Err(GeoValidationError::InvalidCoordinate { field, value });
    }
    Ok(())
}
