//! Persistence seam for completion snapshots.
//!
//! The core never talks to a database directly; it hands the full
//! replacement set to a [`CompletionStore`], whose `apply` must be
//! all-or-nothing per match.

use std::collections::HashMap;

use thiserror::Error;
use uuid::Uuid;

use crate::models::ledger::{CompletionSnapshot, PlayerStatRow, PointLedgerEntry};

#[derive(Error, Debug)]
pub enum StoreError {
    /// A concurrent completion of the same match won the write race.
    #[error("Conflicting completion in flight for match {0}")]
    Conflict(Uuid),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Atomic snapshot storage for completed matches.
///
/// `apply` replaces everything previously persisted for the snapshot's
/// match (score, stat rows, ledger rows) in a single transaction.
/// Partial application must never be observable; on error the previous
/// state remains intact. Concurrent applications for the same match must
/// serialize so the last writer fully wins.
pub trait CompletionStore {
    fn apply(&mut self, snapshot: &CompletionSnapshot) -> Result<(), StoreError>;

    fn ledger_for_match(&self, match_id: Uuid) -> Vec<PointLedgerEntry>;

    fn stats_for_match(&self, match_id: Uuid) -> Vec<PlayerStatRow>;
}

/// In-memory store used by tests and embedding hosts without a database.
///
/// The whole snapshot is swapped per match, which makes the replace
/// trivially atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    matches: HashMap<Uuid, CompletionSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn completion_for_match(&self, match_id: Uuid) -> Option<&CompletionSnapshot> {
        self.matches.get(&match_id)
    }
}

impl CompletionStore for MemoryStore {
    fn apply(&mut self, snapshot: &CompletionSnapshot) -> Result<(), StoreError> {
        self.matches.insert(snapshot.match_id, snapshot.clone());
        log::info!(
            "Committed completion snapshot for match {} ({} stat rows, {} ledger rows)",
            snapshot.match_id,
            snapshot.stats.len(),
            snapshot.ledger.len()
        );
        Ok(())
    }

    fn ledger_for_match(&self, match_id: Uuid) -> Vec<PointLedgerEntry> {
        self.matches.get(&match_id).map(|s| s.ledger.clone()).unwrap_or_default()
    }

    fn stats_for_match(&self, match_id: Uuid) -> Vec<PlayerStatRow> {
        self.matches.get(&match_id).map(|s| s.stats.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::assembler::{CompletionInput, LedgerAssembler};
    use crate::completion::reconciler::reconcile_manual_assignments;
    use crate::engine::variables::VariableRegistry;
    use crate::models::facts::{MatchFacts, PlayerFacts};
    use crate::models::ledger::ManualAssignment;
    use crate::models::position::Position;
    use crate::models::profile::{RuleOverride, RulesProfile};
    use crate::models::rule::{Rule, RuleKind, TargetScope};
    use chrono::{TimeZone, Utc};

    fn manual_rule() -> Rule {
        Rule {
            id: Uuid::new_v4(),
            team_id: Uuid::nil(),
            name: "Goal Scored".to_string(),
            description: "Counted by the captain".to_string(),
            kind: RuleKind::Manual,
            points_awarded: 3,
            target: TargetScope::AllPlayers,
            is_active: true,
        }
    }

    fn team_profile(rule_id: Uuid) -> RulesProfile {
        RulesProfile {
            id: Uuid::new_v4(),
            name: "Team Default".to_string(),
            club_id: Uuid::new_v4(),
            is_club_default: false,
            overrides: vec![RuleOverride { rule_id, custom_points: None, is_enabled: true }],
        }
    }

    #[test]
    fn test_recompletion_with_identical_payload_is_idempotent() {
        let rule = manual_rule();
        let rules = vec![rule.clone()];
        let profile = team_profile(rule.id);
        let registry = VariableRegistry::new();
        let assembler = LedgerAssembler::new(&rules, &registry);

        let mut striker = PlayerFacts::new(Uuid::new_v4(), Position::Forward);
        striker.goals_scored = 2;
        let payload = CompletionInput {
            match_id: Uuid::new_v4(),
            match_facts: MatchFacts::new(2, 1),
            players: vec![striker.clone()],
            manual_assignments: vec![ManualAssignment {
                rule_id: rule.id,
                player_id: striker.player_id,
                count: 2,
            }],
            completed_at: Utc.with_ymd_and_hms(2026, 3, 14, 16, 0, 0).unwrap(),
        };

        let mut store = MemoryStore::new();
        store.apply(&assembler.assemble(&payload, Some(&profile), None)).unwrap();
        let first = store.ledger_for_match(payload.match_id);

        // Re-complete with the identical payload: same rows, no duplication.
        store.apply(&assembler.assemble(&payload, Some(&profile), None)).unwrap();
        let second = store.ledger_for_match(payload.match_id);

        assert_eq!(first, second);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_recompletion_replaces_rather_than_patches() {
        let rule = manual_rule();
        let rules = vec![rule.clone()];
        let profile = team_profile(rule.id);
        let registry = VariableRegistry::new();
        let assembler = LedgerAssembler::new(&rules, &registry);

        let mut striker = PlayerFacts::new(Uuid::new_v4(), Position::Forward);
        striker.goals_scored = 2;
        let mut payload = CompletionInput {
            match_id: Uuid::new_v4(),
            match_facts: MatchFacts::new(2, 1),
            players: vec![striker.clone()],
            manual_assignments: vec![ManualAssignment {
                rule_id: rule.id,
                player_id: striker.player_id,
                count: 2,
            }],
            completed_at: Utc.with_ymd_and_hms(2026, 3, 14, 16, 0, 0).unwrap(),
        };

        let mut store = MemoryStore::new();
        store.apply(&assembler.assemble(&payload, Some(&profile), None)).unwrap();

        // The match gets edited: score changes, the count is revised down.
        payload.match_facts = MatchFacts::new(1, 1);
        payload.players[0].goals_scored = 1;
        payload.manual_assignments[0].count = 1;
        store.apply(&assembler.assemble(&payload, Some(&profile), None)).unwrap();

        let ledger = store.ledger_for_match(payload.match_id);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].points, 3);
        let stats = store.stats_for_match(payload.match_id);
        assert_eq!(stats[0].goals_scored, 1);
        assert_eq!(store.completion_for_match(payload.match_id).unwrap().goals_for, 1);
    }

    #[test]
    fn test_reopen_for_editing_round_trips_counts() {
        let rule = manual_rule();
        let rules = vec![rule.clone()];
        let profile = team_profile(rule.id);
        let registry = VariableRegistry::new();
        let assembler = LedgerAssembler::new(&rules, &registry);

        let striker = PlayerFacts::new(Uuid::new_v4(), Position::Forward);
        let payload = CompletionInput {
            match_id: Uuid::new_v4(),
            match_facts: MatchFacts::new(3, 0),
            players: vec![striker.clone()],
            manual_assignments: vec![ManualAssignment {
                rule_id: rule.id,
                player_id: striker.player_id,
                count: 3,
            }],
            completed_at: Utc.with_ymd_and_hms(2026, 3, 21, 16, 0, 0).unwrap(),
        };

        let mut store = MemoryStore::new();
        store.apply(&assembler.assemble(&payload, Some(&profile), None)).unwrap();

        let reconciled =
            reconcile_manual_assignments(&store.ledger_for_match(payload.match_id));
        assert_eq!(reconciled.len(), 1);
        assert_eq!(reconciled[0].count, 3);
        assert_eq!(reconciled[0].points_per_instance, 3);
    }
}
