//! Per-machine drill-down.

use std::collections::HashMap;

use fleet_data::{FeedbackEntry, FeedbackKind, ItemCategory, ItemId, Machine, MachineId, Snapshot};
use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// One stocked slot of the inspected machine, joined to its catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLine {
    /// Item in the slot.
    pub item_id: ItemId,
    /// Item display name.
    pub name: String,
    /// Item category.
    pub category: ItemCategory,
    /// Remaining units.
    pub quantity: u32,
}

/// Everything an operator sees when inspecting a single machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineReport {
    /// The inspected machine.
    pub machine: Machine,
    /// Its listed inventory, ordered by item name.
    pub stock: Vec<StockLine>,
    /// Its issue-type feedback, in timestamp order.
    pub issues: Vec<FeedbackEntry>,
}

/// Builds the drill-down view for one machine.
///
/// # Errors
///
/// Returns [`QueryError::MachineNotFound`] when the id is absent from the
/// snapshot.
pub fn machine_report(snapshot: &Snapshot, id: MachineId) -> Result<MachineReport, QueryError> {
    let machine = snapshot
        .machine(id)
        .cloned()
        .ok_or(QueryError::MachineNotFound { id })?;

    let items: HashMap<ItemId, (&str, ItemCategory)> = snapshot
        .items
        .iter()
        .map(|item| (item.id, (item.name.as_str(), item.category)))
        .collect();

    let mut stock: Vec<StockLine> = snapshot
        .inventory
        .iter()
        .filter(|record| record.machine_id == id)
        .filter_map(|record| {
            items.get(&record.item_id).map(|&(name, category)| StockLine {
                item_id: record.item_id,
                name: name.to_owned(),
                category,
                quantity: record.quantity,
            })
        })
        .collect();
    stock.sort_by(|a, b| a.name.cmp(&b.name));

    let mut issues: Vec<FeedbackEntry> = snapshot
        .feedback
        .iter()
        .filter(|entry| entry.machine_id == id && entry.kind == FeedbackKind::Issue)
        .cloned()
        .collect();
    issues.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));

    Ok(MachineReport {
        machine,
        stock,
        issues,
    })
}

#[cfg(test)]
mod tests {
    use fleet_data::{
        Accessibility, FeedbackId, InventoryRecord, Item, Timestamp,
    };
    use rust_decimal_macros::dec;

    use super::*;

    fn snapshot() -> Snapshot {
        let machine = Machine {
            id: MachineId::from_u128(1),
            latitude: 42.7,
            longitude: -84.5,
            address: "Union Building".to_owned(),
            accessibility: Accessibility::Ramp,
        };
        let cola = Item {
            id: ItemId::from_u128(10),
            name: "Coca-Cola".to_owned(),
            category: ItemCategory::Drink,
            price: dec!(1.75),
        };
        let bar = Item {
            id: ItemId::from_u128(11),
            name: "Granola Bar".to_owned(),
            category: ItemCategory::Health,
            price: dec!(2.00),
        };

        Snapshot {
            machines: vec![machine],
            items: vec![bar.clone(), cola.clone()],
            inventory: vec![
                InventoryRecord {
                    machine_id: MachineId::from_u128(1),
                    item_id: bar.id,
                    quantity: 4,
                },
                InventoryRecord {
                    machine_id: MachineId::from_u128(1),
                    item_id: cola.id,
                    quantity: 0,
                },
            ],
            feedback: vec![
                issue_at(1, "2026-01-20 12:00"),
                issue_at(2, "2026-01-05 08:30"),
                request_at(3, "2026-01-01 09:00"),
            ],
            ..Snapshot::default()
        }
    }

    fn issue_at(id: u128, timestamp: &str) -> FeedbackEntry {
        FeedbackEntry {
            id: FeedbackId::from_u128(id),
            machine_id: MachineId::from_u128(1),
            kind: FeedbackKind::Issue,
            content: "Card reader error".to_owned(),
            timestamp: Timestamp::parse(timestamp).expect("valid timestamp"),
        }
    }

    fn request_at(id: u128, timestamp: &str) -> FeedbackEntry {
        FeedbackEntry {
            kind: FeedbackKind::Request,
            content: "Yerba Mate".to_owned(),
            ..issue_at(id, timestamp)
        }
    }

    #[test]
    fn report_joins_stock_to_item_names() {
        let report =
            machine_report(&snapshot(), MachineId::from_u128(1)).expect("machine exists");

        let lines: Vec<(&str, u32)> = report
            .stock
            .iter()
            .map(|line| (line.name.as_str(), line.quantity))
            .collect();
        assert_eq!(lines, [("Coca-Cola", 0), ("Granola Bar", 4)]);
    }

    #[test]
    fn report_lists_only_issues_in_timestamp_order() {
        let report =
            machine_report(&snapshot(), MachineId::from_u128(1)).expect("machine exists");

        let ids: Vec<FeedbackId> = report.issues.iter().map(|entry| entry.id).collect();
        assert_eq!(ids, [FeedbackId::from_u128(2), FeedbackId::from_u128(1)]);
    }

    #[test]
    fn unknown_machine_is_a_not_found_error() {
        let missing = MachineId::from_u128(99);
        let result = machine_report(&snapshot(), missing);

        assert_eq!(result, Err(QueryError::MachineNotFound { id: missing }));
    }
}
