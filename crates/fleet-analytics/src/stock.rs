//! Stock-level metrics across the fleet.

use std::collections::HashMap;

use fleet_data::{ItemId, MachineId, Snapshot};
use serde::{Deserialize, Serialize};

/// Threshold below which a slot is flagged for restocking, in units.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 3;

/// One inventory line flagged by the low-stock report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockLine {
    /// Machine holding the slot.
    pub machine_id: MachineId,
    /// Machine display label.
    pub address: String,
    /// Item in the slot.
    pub item_id: ItemId,
    /// Item display name.
    pub item_name: String,
    /// Remaining units.
    pub quantity: u32,
}

/// Mean stock health across the fleet, as a percentage.
///
/// A machine's health is the share of its listed inventory lines that are
/// in stock (quantity above zero). Machines with no listed lines score 0 so
/// a missing planogram reads as unhealthy; an empty fleet reports 0.
#[must_use]
pub fn fleet_stock_health(snapshot: &Snapshot) -> f64 {
    if snapshot.machines.is_empty() {
        return 0.0;
    }

    let mut lines: HashMap<MachineId, (usize, usize)> = HashMap::new();
    for record in &snapshot.inventory {
        let (total, in_stock) = lines.entry(record.machine_id).or_insert((0, 0));
        *total += 1;
        if record.quantity > 0 {
            *in_stock += 1;
        }
    }

    let sum: f64 = snapshot
        .machines
        .iter()
        .map(|machine| {
            lines
                .get(&machine.id)
                .map_or(0.0, |&(total, in_stock)| percentage(in_stock, total))
        })
        .sum();
    mean(sum, snapshot.machines.len())
}

/// Inventory lines below the given threshold, joined to machine and item
/// labels, ordered by remaining quantity, then address, then item name.
///
/// Lines whose machine or item id does not resolve are skipped; the
/// integrity validator reports those separately.
#[must_use]
pub fn low_stock_report(snapshot: &Snapshot, threshold: u32) -> Vec<LowStockLine> {
    let addresses: HashMap<MachineId, &str> = snapshot
        .machines
        .iter()
        .map(|machine| (machine.id, machine.address.as_str()))
        .collect();
    let item_names: HashMap<ItemId, &str> = snapshot
        .items
        .iter()
        .map(|item| (item.id, item.name.as_str()))
        .collect();

    let mut report: Vec<LowStockLine> = snapshot
        .inventory
        .iter()
        .filter(|record| record.quantity < threshold)
        .filter_map(|record| {
            let address = addresses.get(&record.machine_id)?;
            let item_name = item_names.get(&record.item_id)?;
            Some(LowStockLine {
                machine_id: record.machine_id,
                address: (*address).to_owned(),
                item_id: record.item_id,
                item_name: (*item_name).to_owned(),
                quantity: record.quantity,
            })
        })
        .collect();

    report.sort_by(|a, b| {
        a.quantity
            .cmp(&b.quantity)
            .then_with(|| a.address.cmp(&b.address))
            .then_with(|| a.item_name.cmp(&b.item_name))
    });
    report
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "stock health is an aggregate percentage; counts are far below f64 precision limits"
)]
fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "fleet means divide by the machine count, far below f64 precision limits"
)]
fn mean(sum: f64, count: usize) -> f64 {
    sum / count as f64
}
