//! Re-completion reconciliation.
//!
//! When a completed match is reopened for editing, the persisted TEAM and
//! CLUB ledger rows must collapse back into one editable count per
//! (player, rule) so the wizard can present a single control.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::ledger::{ManualAssignment, PointLedgerEntry, PointType};

/// One editable per-(player, rule) count rebuilt from ledger rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledAssignment {
    pub rule_id: Uuid,
    pub player_id: Uuid,
    pub count: u32,
    /// Point value of one instance, recomputed from the row that supplied
    /// the reconciled count.
    pub points_per_instance: i32,
}

impl From<&ReconciledAssignment> for ManualAssignment {
    fn from(reconciled: &ReconciledAssignment) -> Self {
        ManualAssignment {
            rule_id: reconciled.rule_id,
            player_id: reconciled.player_id,
            count: reconciled.count,
        }
    }
}

/// Collapse a match's manual ledger rows into editable counts.
///
/// Rows written by the current engine carry a first-class
/// `instance_count`; older rows encode the count in their notes and are
/// parsed tolerantly (unparseable rows count as one instance). When the
/// TEAM and CLUB siblings of one group disagree (possible if the two
/// profiles were edited independently between completions), the larger
/// count wins. Output ordering is deterministic.
pub fn reconcile_manual_assignments(
    entries: &[PointLedgerEntry],
) -> Vec<ReconciledAssignment> {
    let mut groups: BTreeMap<(Uuid, Uuid), ReconciledAssignment> = BTreeMap::new();

    for entry in entries.iter().filter(|e| e.is_manual) {
        let count = row_instance_count(entry);
        let candidate = ReconciledAssignment {
            rule_id: entry.rule_id,
            player_id: entry.player_id,
            count,
            points_per_instance: entry.points / count as i32,
        };

        groups
            .entry((entry.player_id, entry.rule_id))
            .and_modify(|current| {
                let replaces = count > current.count
                    // TEAM rows win ties so the reconciled per-instance
                    // value tracks the team profile when counts agree.
                    || (count == current.count && entry.point_type == PointType::Team);
                if replaces {
                    *current = candidate;
                }
            })
            .or_insert(candidate);
    }

    groups.into_values().collect()
}

/// Instance count of one ledger row: the structured column when present,
/// otherwise the integer preceding "instances" in the notes, otherwise 1.
fn row_instance_count(entry: &PointLedgerEntry) -> u32 {
    if entry.instance_count >= 1 {
        return entry.instance_count;
    }
    parse_instance_count(&entry.notes).unwrap_or(1).max(1)
}

fn parse_instance_count(notes: &str) -> Option<u32> {
    let tokens: Vec<&str> = notes.split_whitespace().collect();
    let marker = tokens.iter().position(|t| t.starts_with("instance"))?;
    if marker == 0 {
        return None;
    }
    tokens[marker - 1].parse().ok()
}
