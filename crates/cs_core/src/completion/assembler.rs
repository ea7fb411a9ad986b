//! Ledger assembly at match completion.
//!
//! One invocation per (re-)completion builds the full replacement set,
//! stat rows plus ledger rows for both applicable profiles, which the
//! store then swaps in atomically.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::engine::rule::RuleEvaluator;
use crate::engine::variables::VariableRegistry;
use crate::models::facts::{MatchFacts, PlayerFacts};
use crate::models::ledger::{
    CompletionSnapshot, ManualAssignment, MatchStatus, PlayerStatRow, PointLedgerEntry, PointType,
};
use crate::models::profile::RulesProfile;
use crate::models::rule::Rule;

/// Everything the completion workflow collects for one match.
#[derive(Debug, Clone)]
pub struct CompletionInput {
    pub match_id: Uuid,
    pub match_facts: MatchFacts,
    pub players: Vec<PlayerFacts>,
    pub manual_assignments: Vec<ManualAssignment>,
    pub completed_at: DateTime<Utc>,
}

/// Builds completion snapshots from match facts, manual assignments, and
/// the two applicable rule profiles.
pub struct LedgerAssembler<'a> {
    rules: &'a [Rule],
    registry: &'a VariableRegistry,
}

impl<'a> LedgerAssembler<'a> {
    pub fn new(rules: &'a [Rule], registry: &'a VariableRegistry) -> Self {
        Self { rules, registry }
    }

    /// Assemble the full replacement set for one match.
    ///
    /// The computation runs once per applicable profile: an absent profile
    /// simply contributes no rows for its point type. Manual assignments
    /// become `is_manual` rows priced at the profile's effective per-rule
    /// value; automatic result/performance awards are evaluated with the
    /// same effective values and persisted alongside.
    pub fn assemble(
        &self,
        input: &CompletionInput,
        team_profile: Option<&RulesProfile>,
        club_profile: Option<&RulesProfile>,
    ) -> CompletionSnapshot {
        let profiles =
            [(PointType::Team, team_profile), (PointType::Club, club_profile)];
        let mut ledger = Vec::new();

        for assignment in &input.manual_assignments {
            let Some(rule) = self.rule_by_id(assignment.rule_id) else {
                log::warn!(
                    "Skipping manual assignment for unknown rule {}",
                    assignment.rule_id
                );
                continue;
            };
            // One assignment id links the TEAM/CLUB sibling rows. Derived
            // deterministically so re-completion reproduces the same batch.
            let assignment_id =
                assignment_uuid(input.match_id, assignment.rule_id, assignment.player_id);
            for (point_type, profile) in profiles {
                let Some(profile) = profile else { continue };
                let Some(per_instance) = profile.effective_points(rule) else { continue };
                ledger.push(PointLedgerEntry {
                    player_id: assignment.player_id,
                    match_id: input.match_id,
                    rule_id: assignment.rule_id,
                    points: assignment.count as i32 * per_instance,
                    point_type,
                    profile_id: profile.id,
                    assignment_id: Some(assignment_id),
                    instance_count: assignment.count,
                    is_manual: true,
                    notes: format!("Manual assignment: {} instances", assignment.count),
                });
            }
        }

        let evaluator = RuleEvaluator::new(self.registry);
        for (point_type, profile) in profiles {
            let Some(profile) = profile else { continue };
            for rule in self.rules.iter().filter(|r| r.is_active && r.is_automatic()) {
                let Some(points) = profile.effective_points(rule) else { continue };
                for result in evaluator.evaluate_rule_with_points(
                    rule,
                    points,
                    &input.match_facts,
                    &input.players,
                ) {
                    ledger.push(PointLedgerEntry {
                        player_id: result.player_id,
                        match_id: input.match_id,
                        rule_id: rule.id,
                        points: result.points,
                        point_type,
                        profile_id: profile.id,
                        assignment_id: None,
                        instance_count: 1,
                        is_manual: false,
                        notes: result.reason,
                    });
                }
            }
        }

        let stats = input
            .players
            .iter()
            .map(|p| PlayerStatRow::from_facts(input.match_id, p))
            .collect::<Vec<_>>();

        log::debug!(
            "Assembled completion snapshot for match {}: {} stat rows, {} ledger rows",
            input.match_id,
            stats.len(),
            ledger.len()
        );

        CompletionSnapshot {
            match_id: input.match_id,
            goals_for: input.match_facts.goals_for,
            goals_against: input.match_facts.goals_against,
            status: MatchStatus::Completed,
            stats,
            ledger,
            completed_at: input.completed_at,
        }
    }

    fn rule_by_id(&self, rule_id: Uuid) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == rule_id)
    }
}

/// Deterministic id for the TEAM/CLUB sibling rows of one manual
/// assignment, namespaced by match.
fn assignment_uuid(match_id: Uuid, rule_id: Uuid, player_id: Uuid) -> Uuid {
    let mut name = Vec::with_capacity(32);
    name.extend_from_slice(rule_id.as_bytes());
    name.extend_from_slice(player_id.as_bytes());
    Uuid::new_v5(&match_id, &name)
}
