//! Demand, sales and maintenance rankings.
//!
//! All groupings are exact; no sampling or approximation. Every ranking has
//! a deterministic tie-break, so repeated calls against an unchanged
//! snapshot return identical orderings.

use std::collections::{BTreeMap, HashMap};

use fleet_data::{FeedbackKind, ItemId, MachineId, Snapshot};
use serde::{Deserialize, Serialize};

/// Default number of machines surfaced by the maintenance ranking.
pub const DEFAULT_MAINTENANCE_LIMIT: usize = 5;

/// An item name with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedItem {
    /// Product name.
    pub name: String,
    /// Exact occurrence count.
    pub count: usize,
}

/// A machine ranked by reported issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenancePriority {
    /// Machine needing attention.
    pub machine_id: MachineId,
    /// Machine display label.
    pub address: String,
    /// Exact issue count.
    pub issue_count: usize,
}

/// Ranks requested products by how often customers asked for them.
///
/// Groups request-type feedback by content, counts occurrences, and orders
/// by count descending with ties broken by name ascending.
#[must_use]
pub fn demand_ranking(snapshot: &Snapshot) -> Vec<RankedItem> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in &snapshot.feedback {
        if entry.kind == FeedbackKind::Request {
            *counts.entry(entry.content.as_str()).or_insert(0) += 1;
        }
    }

    // BTreeMap iteration is name-ascending; the stable sort keeps that
    // order within equal counts.
    let mut ranking: Vec<RankedItem> = counts
        .into_iter()
        .map(|(name, count)| RankedItem {
            name: name.to_owned(),
            count,
        })
        .collect();
    ranking.sort_by(|a, b| b.count.cmp(&a.count));
    ranking
}

/// Ranks catalog items by historical purchase volume.
///
/// Same ordering contract as [`demand_ranking`]: count descending, name
/// ascending on ties.
#[must_use]
pub fn sales_ranking(snapshot: &Snapshot) -> Vec<RankedItem> {
    let mut counts: HashMap<ItemId, usize> = HashMap::new();
    for purchase in &snapshot.purchases {
        *counts.entry(purchase.item_id).or_insert(0) += 1;
    }

    let mut ranking: Vec<RankedItem> = snapshot
        .items
        .iter()
        .filter_map(|item| {
            counts.get(&item.id).map(|&count| RankedItem {
                name: item.name.clone(),
                count,
            })
        })
        .collect();
    ranking.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    ranking
}

/// Ranks machines by reported issue count, most urgent first.
///
/// Issue-type feedback is grouped by machine and joined to the machine's
/// display label. Ties are broken by machine id ascending, and the result
/// is truncated to `limit` rows ([`DEFAULT_MAINTENANCE_LIMIT`] by
/// convention).
#[must_use]
pub fn maintenance_priority(snapshot: &Snapshot, limit: usize) -> Vec<MaintenancePriority> {
    let mut counts: BTreeMap<MachineId, usize> = BTreeMap::new();
    for entry in &snapshot.feedback {
        if entry.kind == FeedbackKind::Issue {
            *counts.entry(entry.machine_id).or_insert(0) += 1;
        }
    }

    let addresses: HashMap<MachineId, &str> = snapshot
        .machines
        .iter()
        .map(|machine| (machine.id, machine.address.as_str()))
        .collect();

    // BTreeMap iteration is id-ascending; the stable sort keeps that order
    // within equal counts.
    let mut ranking: Vec<MaintenancePriority> = counts
        .into_iter()
        .filter_map(|(machine_id, issue_count)| {
            addresses.get(&machine_id).map(|address| MaintenancePriority {
                machine_id,
                address: (*address).to_owned(),
                issue_count,
            })
        })
        .collect();
    ranking.sort_by(|a, b| b.issue_count.cmp(&a.issue_count));
    ranking.truncate(limit);
    ranking
}
