//! The atomic unit produced by one generation run.

use serde::{Deserialize, Serialize};

use crate::entities::{
    FeedbackEntry, InventoryRecord, Item, ItemId, Machine, MachineId, Purchase, User,
};

/// The full set of entity tables produced by one generation run.
///
/// A snapshot is treated as a single value: it is built in full, validated,
/// and only then published, so readers never observe a partially populated
/// intermediate state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Registered customer accounts.
    pub users: Vec<User>,
    /// The item catalog.
    pub items: Vec<Item>,
    /// The machine fleet.
    pub machines: Vec<Machine>,
    /// Stocked slots across the fleet.
    pub inventory: Vec<InventoryRecord>,
    /// Historical purchases.
    pub purchases: Vec<Purchase>,
    /// Customer feedback log.
    pub feedback: Vec<FeedbackEntry>,
}

impl Snapshot {
    /// Looks up a machine by id.
    #[must_use]
    pub fn machine(&self, id: MachineId) -> Option<&Machine> {
        self.machines.iter().find(|machine| machine.id == id)
    }

    /// Looks up a catalog item by id.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }
}
