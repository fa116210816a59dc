//! Snapshot integrity validation.
//!
//! Defence in depth: the generator's dependency ordering already guarantees
//! these invariants, so a violation here points at a snapshot that arrived
//! through some other path (hand-built fixtures, external files). The
//! regeneration orchestration re-checks every snapshot before publishing it.

use std::collections::HashSet;

use crate::entities::{ItemId, MachineId, UserId};
use crate::error::IntegrityError;
use crate::snapshot::Snapshot;

/// Checks every cross-table invariant of a snapshot.
///
/// Verifies that all foreign keys resolve, that `(machine, item)` inventory
/// keys are unique, that item names and machine addresses are unique, and
/// that no quantity exceeds `max_quantity`.
///
/// # Errors
///
/// Returns the first [`IntegrityError`] found.
pub fn validate_snapshot(snapshot: &Snapshot, max_quantity: u32) -> Result<(), IntegrityError> {
    let machine_ids: HashSet<MachineId> =
        snapshot.machines.iter().map(|machine| machine.id).collect();
    let item_ids: HashSet<ItemId> = snapshot.items.iter().map(|item| item.id).collect();
    let user_ids: HashSet<UserId> = snapshot.users.iter().map(|user| user.id).collect();

    validate_unique_labels(snapshot)?;
    validate_inventory(snapshot, &machine_ids, &item_ids, max_quantity)?;

    for purchase in &snapshot.purchases {
        if !user_ids.contains(&purchase.user_id) {
            return Err(IntegrityError::DanglingUser {
                table: "purchases",
                id: purchase.user_id,
            });
        }
        if !machine_ids.contains(&purchase.machine_id) {
            return Err(IntegrityError::DanglingMachine {
                table: "purchases",
                id: purchase.machine_id,
            });
        }
        if !item_ids.contains(&purchase.item_id) {
            return Err(IntegrityError::DanglingItem {
                table: "purchases",
                id: purchase.item_id,
            });
        }
    }

    for entry in &snapshot.feedback {
        if !machine_ids.contains(&entry.machine_id) {
            return Err(IntegrityError::DanglingMachine {
                table: "feedback",
                id: entry.machine_id,
            });
        }
    }

    Ok(())
}

fn validate_unique_labels(snapshot: &Snapshot) -> Result<(), IntegrityError> {
    let mut names = HashSet::new();
    for item in &snapshot.items {
        if !names.insert(item.name.as_str()) {
            return Err(IntegrityError::DuplicateItemName {
                name: item.name.clone(),
            });
        }
    }

    let mut addresses = HashSet::new();
    for machine in &snapshot.machines {
        if !addresses.insert(machine.address.as_str()) {
            return Err(IntegrityError::DuplicateAddress {
                address: machine.address.clone(),
            });
        }
    }
    Ok(())
}

fn validate_inventory(
    snapshot: &Snapshot,
    machine_ids: &HashSet<MachineId>,
    item_ids: &HashSet<ItemId>,
    max_quantity: u32,
) -> Result<(), IntegrityError> {
    let mut keys = HashSet::new();
    for record in &snapshot.inventory {
        if !machine_ids.contains(&record.machine_id) {
            return Err(IntegrityError::DanglingMachine {
                table: "inventory",
                id: record.machine_id,
            });
        }
        if !item_ids.contains(&record.item_id) {
            return Err(IntegrityError::DanglingItem {
                table: "inventory",
                id: record.item_id,
            });
        }
        if !keys.insert((record.machine_id, record.item_id)) {
            return Err(IntegrityError::DuplicateInventory {
                machine_id: record.machine_id,
                item_id: record.item_id,
            });
        }
        if record.quantity > max_quantity {
            return Err(IntegrityError::QuantityOutOfRange {
                machine_id: record.machine_id,
                item_id: record.item_id,
                quantity: record.quantity,
                max: max_quantity,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;
    use crate::entities::{FeedbackEntry, FeedbackId, FeedbackKind, InventoryRecord, Timestamp};
    use crate::generator::generate;

    fn generated_snapshot() -> (Snapshot, u32) {
        let config = GenerationConfig {
            user_count: 4,
            machine_count: 3,
            purchase_count: 10,
            feedback_count: 10,
            ..GenerationConfig::default()
        };
        let max = config.stocking.max_quantity;
        (generate(&config).expect("generation succeeds"), max)
    }

    #[test]
    fn generated_snapshots_pass_validation() {
        let (snapshot, max) = generated_snapshot();
        assert_eq!(validate_snapshot(&snapshot, max), Ok(()));
    }

    #[test]
    fn detects_dangling_feedback_machine() {
        let (mut snapshot, max) = generated_snapshot();
        let rogue = MachineId::from_u128(0xdead);
        snapshot.feedback.push(FeedbackEntry {
            id: FeedbackId::from_u128(1),
            machine_id: rogue,
            kind: FeedbackKind::Issue,
            content: "Stuck item".to_owned(),
            timestamp: Timestamp::default(),
        });

        assert_eq!(
            validate_snapshot(&snapshot, max),
            Err(IntegrityError::DanglingMachine {
                table: "feedback",
                id: rogue,
            })
        );
    }

    #[test]
    fn detects_duplicate_inventory_keys() {
        let (mut snapshot, max) = generated_snapshot();
        let first = snapshot.inventory.first().cloned().expect("has inventory");
        snapshot.inventory.push(first.clone());

        assert_eq!(
            validate_snapshot(&snapshot, max),
            Err(IntegrityError::DuplicateInventory {
                machine_id: first.machine_id,
                item_id: first.item_id,
            })
        );
    }

    #[test]
    fn detects_quantity_above_maximum() {
        let (mut snapshot, max) = generated_snapshot();
        let machine_id = snapshot.machines.first().map(|m| m.id).expect("machine");
        let item_id = snapshot.items.first().map(|i| i.id).expect("item");
        snapshot.inventory.clear();
        snapshot.inventory.push(InventoryRecord {
            machine_id,
            item_id,
            quantity: max + 1,
        });

        assert_eq!(
            validate_snapshot(&snapshot, max),
            Err(IntegrityError::QuantityOutOfRange {
                machine_id,
                item_id,
                quantity: max + 1,
                max,
            })
        );
    }

    #[test]
    fn detects_duplicate_addresses() {
        let (mut snapshot, max) = generated_snapshot();
        let first_address = snapshot
            .machines
            .first()
            .map(|m| m.address.clone())
            .expect("machine");
        if let Some(last) = snapshot.machines.last_mut() {
            last.address = first_address.clone();
        }

        assert_eq!(
            validate_snapshot(&snapshot, max),
            Err(IntegrityError::DuplicateAddress {
                address: first_address,
            })
        );
    }
}
