//! Fleet-wide summary metrics.

use fleet_data::{FeedbackKind, Snapshot};
use serde::{Deserialize, Serialize};

use crate::stock::fleet_stock_health;

/// Top-line operational metrics for the whole fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    /// Number of machines in the snapshot.
    pub machine_count: usize,
    /// Number of issue-type feedback entries.
    pub active_issue_count: usize,
    /// Mean stock health percentage across machines.
    pub mean_stock_health: f64,
}

/// Computes the fleet summary for a snapshot.
#[must_use]
pub fn fleet_summary(snapshot: &Snapshot) -> FleetSummary {
    let active_issue_count = snapshot
        .feedback
        .iter()
        .filter(|entry| entry.kind == FeedbackKind::Issue)
        .count();

    FleetSummary {
        machine_count: snapshot.machines.len(),
        active_issue_count,
        mean_stock_health: fleet_stock_health(snapshot),
    }
}

#[cfg(test)]
mod tests {
    use fleet_data::{FeedbackEntry, FeedbackId, MachineId, Timestamp};

    use super::*;

    fn feedback(id: u128, kind: FeedbackKind) -> FeedbackEntry {
        FeedbackEntry {
            id: FeedbackId::from_u128(id),
            machine_id: MachineId::from_u128(1),
            kind,
            content: "Stuck item".to_owned(),
            timestamp: Timestamp::default(),
        }
    }

    #[test]
    fn counts_only_issue_feedback() {
        let snapshot = Snapshot {
            feedback: vec![
                feedback(1, FeedbackKind::Request),
                feedback(2, FeedbackKind::Issue),
                feedback(3, FeedbackKind::Request),
                feedback(4, FeedbackKind::Issue),
            ],
            ..Snapshot::default()
        };

        let summary = fleet_summary(&snapshot);
        assert_eq!(summary.active_issue_count, 2);
        assert_eq!(summary.machine_count, 0);
    }

    #[test]
    fn empty_snapshot_summarises_to_zeroes() {
        let summary = fleet_summary(&Snapshot::default());
        assert_eq!(summary.machine_count, 0);
        assert_eq!(summary.active_issue_count, 0);
        assert_eq!(summary.mean_stock_health, 0.0);
    }
}
