//! Vending fleet entity records.
//!
//! This module defines the typed rows that make up a dataset snapshot.
//! Entities are plain data with named fields and declared identifier types;
//! the generator is responsible for upholding the cross-table invariants
//! (referential integrity, unique item names, unique machine addresses).

use std::fmt;

use chrono::{NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Declares a UUID-backed identifier newtype.
macro_rules! declare_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Wraps an existing UUID.
            #[must_use]
            pub const fn new(id: Uuid) -> Self {
                Self(id)
            }

            /// Builds an identifier from raw 128-bit RNG output.
            #[must_use]
            pub const fn from_u128(value: u128) -> Self {
                Self(Uuid::from_u128(value))
            }

            /// Access the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

declare_id! {
    /// Stable user identifier.
    UserId
}

declare_id! {
    /// Stable catalog item identifier.
    ItemId
}

declare_id! {
    /// Stable vending machine identifier.
    MachineId
}

declare_id! {
    /// Stable feedback entry identifier.
    FeedbackId
}

declare_id! {
    /// Stable purchase identifier.
    PurchaseId
}

/// Catalog category for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    /// Bottled or canned beverages.
    Drink,
    /// Savoury snacks.
    Snack,
    /// Confectionery.
    Candy,
    /// Health-oriented products.
    Health,
    /// Full meal products.
    Meal,
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Drink => "drink",
            Self::Snack => "snack",
            Self::Candy => "candy",
            Self::Health => "health",
            Self::Meal => "meal",
        };
        f.write_str(label)
    }
}

/// Accessibility feature fitted to a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accessibility {
    /// No assistive fittings.
    Standard,
    /// Wheelchair ramp access.
    Ramp,
    /// Voice guidance.
    Voice,
    /// Braille keypad.
    Braille,
    /// Elevator-level placement.
    Elevator,
}

impl Accessibility {
    /// Every feature variant, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Standard,
        Self::Ramp,
        Self::Voice,
        Self::Braille,
        Self::Elevator,
    ];

    /// Returns `true` when the machine offers an assistive fitting beyond
    /// the standard cabinet.
    #[must_use]
    pub const fn is_assisted(self) -> bool {
        !matches!(self, Self::Standard)
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Standard => "standard",
            Self::Ramp => "ramp",
            Self::Voice => "voice",
            Self::Braille => "braille",
            Self::Elevator => "elevator",
        };
        f.write_str(label)
    }
}

/// Kind of a feedback entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    /// A customer asking for a product to be stocked.
    Request,
    /// A customer reporting a machine fault.
    Issue,
}

/// Error raised when parsing a [`Timestamp`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid timestamp '{value}': expected YYYY-MM-DD HH:MM[:SS]")]
pub struct TimestampParseError {
    /// The rejected input text.
    pub value: String,
}

/// Minute-precision timestamp serialised as lexicographically sortable text.
///
/// The wire format is `YYYY-MM-DD HH:MM` (seconds are appended only when
/// non-zero), which sorts the same way chronologically and alphabetically.
///
/// # Example
///
/// ```
/// use fleet_data::Timestamp;
///
/// let ts = Timestamp::parse("2026-01-05 09:30").expect("valid timestamp");
/// assert_eq!(ts.to_string(), "2026-01-05 09:30");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(NaiveDateTime);

/// Wire format without seconds.
const MINUTE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Wire format with seconds.
const SECOND_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl Timestamp {
    /// Wraps a naive datetime without altering its precision.
    #[must_use]
    pub const fn from_naive(value: NaiveDateTime) -> Self {
        Self(value)
    }

    /// Builds a timestamp from calendar and minute components.
    ///
    /// Returns `None` when the components do not name a real instant.
    #[must_use]
    pub fn from_ymd_hm(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Self> {
        chrono::NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .map(Self)
    }

    /// Parses the sortable text format, with or without seconds.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampParseError`] when the input matches neither
    /// `YYYY-MM-DD HH:MM` nor `YYYY-MM-DD HH:MM:SS`.
    pub fn parse(value: &str) -> Result<Self, TimestampParseError> {
        NaiveDateTime::parse_from_str(value, MINUTE_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(value, SECOND_FORMAT))
            .map(Self)
            .map_err(|_| TimestampParseError {
                value: value.to_owned(),
            })
    }

    /// Access the underlying naive datetime.
    #[must_use]
    pub const fn as_naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self(NaiveDateTime::default())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = if self.0.second() == 0 {
            MINUTE_FORMAT
        } else {
            SECOND_FORMAT
        };
        write!(f, "{}", self.0.format(format))
    }
}

impl From<Timestamp> for String {
    fn from(value: Timestamp) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Timestamp {
    type Error = TimestampParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// A registered customer account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier.
    pub id: UserId,
    /// Full display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Credit balance in cents.
    pub credits: i64,
    /// Free-text accessibility preference.
    pub accessibility_preference: String,
}

/// A catalog item available for stocking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier.
    pub id: ItemId,
    /// Item name, unique within one generated catalog.
    pub name: String,
    /// Catalog category.
    pub category: ItemCategory,
    /// Unit price; always positive.
    pub price: Decimal,
}

/// A physical vending machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    /// Unique identifier.
    pub id: MachineId,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Display label, unique within one generated fleet.
    pub address: String,
    /// Fitted accessibility feature.
    pub accessibility: Accessibility,
}

/// One stocked slot of a machine.
///
/// The composite key is `(machine_id, item_id)`. A quantity of zero means
/// the item is listed but out of stock, not absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    /// Machine holding the slot.
    pub machine_id: MachineId,
    /// Item listed in the slot.
    pub item_id: ItemId,
    /// Units currently available.
    pub quantity: u32,
}

/// An immutable customer feedback log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    /// Unique identifier.
    pub id: FeedbackId,
    /// Machine the feedback concerns.
    pub machine_id: MachineId,
    /// Request or issue.
    pub kind: FeedbackKind,
    /// Free text: a requested product name, or a fault description.
    pub content: String,
    /// When the feedback was submitted.
    pub timestamp: Timestamp,
}

/// A historical purchase record.
///
/// Purchases are simulated history: they never decrement
/// [`InventoryRecord::quantity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    /// Unique identifier.
    pub id: PurchaseId,
    /// Buying user.
    pub user_id: UserId,
    /// Machine the purchase happened at.
    pub machine_id: MachineId,
    /// Item purchased.
    pub item_id: ItemId,
    /// When the purchase happened.
    pub timestamp: Timestamp,
    /// Credits charged; equals the item price at generation time.
    pub credits_charged: Decimal,
}
