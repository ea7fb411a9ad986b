//! # cs_core - Scoring Rules Engine
//!
//! This library turns raw game/player statistics into point awards through
//! team-authored, condition-based rules, and reconciles team-level and
//! club-level scoring independently from one set of match facts.
//!
//! ## Features
//! - Condition-based rule evaluation over match and player fact sets
//! - Dual-profile (team default / club default) point ledgers
//! - Idempotent re-completion: the whole ledger is rebuilt and atomically
//!   replaced, never patched
//! - JSON API for easy integration with host applications

pub mod api;
pub mod completion;
pub mod data;
pub mod engine;
pub mod error;
pub mod models;
pub mod validation;

// Re-export main API functions
pub use api::{
    complete_match_json, preview_rules_json, reconcile_match_json, validate_rules_json,
    CompletionRequest, CompletionResponse, PreviewRequest, PreviewResponse,
};
pub use error::{Result, ScoreError};

// Re-export the evaluation pipeline
pub use engine::{ConditionEvaluator, RuleEvaluator, VariableRegistry};

// Re-export the completion workflow
pub use completion::{
    reconcile_manual_assignments, CompletionInput, CompletionStore, LedgerAssembler, MemoryStore,
    ReconciledAssignment, StoreError,
};

// Re-export the data model
pub use models::{
    keys, points_total, ComparisonOp, CompletionSnapshot, Condition, CustomVariable,
    ManualAssignment, MatchFacts, MatchStatus, PlayerFacts, PlayerRuleResult, PlayerStatRow,
    PointAward, PointLedgerEntry, PointType, Position, Rule, RuleKind, RuleOverride, RulesProfile,
    TargetScope, VariableDescriptor, VariableScope, VariableType, VariableValue,
};
pub use validation::{RuleValidator, ValidationError};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn scenario_request(
        match_id: Uuid,
        goal_scored_id: Uuid,
        clean_sheet_id: Uuid,
        keeper_id: Uuid,
        striker_id: Uuid,
    ) -> serde_json::Value {
        json!({
            "schema_version": 1,
            "match_id": match_id,
            "rules": [
                {
                    "id": goal_scored_id,
                    "team_id": Uuid::nil(),
                    "name": "Goal Scored",
                    "description": "Counted by the captain after the match",
                    "category": "MANUAL",
                    "points_awarded": 3,
                    "scope": "ALL_PLAYERS"
                },
                {
                    "id": clean_sheet_id,
                    "team_id": Uuid::nil(),
                    "name": "Clean Sheet",
                    "description": "Goalkeeper kept a clean sheet",
                    "category": "RESULT",
                    "conditions": [
                        {"variable": "goalsAgainst", "operator": "==", "value": 0, "scope": "MATCH"}
                    ],
                    "points_awarded": 4,
                    "scope": "BY_POSITION",
                    "positions": ["GOALKEEPER"]
                }
            ],
            "team_profile": {
                "id": Uuid::new_v4(),
                "name": "Team Default",
                "club_id": Uuid::nil(),
                "overrides": [
                    {"rule_id": goal_scored_id, "custom_points": 4, "is_enabled": true},
                    {"rule_id": clean_sheet_id, "is_enabled": true}
                ]
            },
            "club_profile": {
                "id": Uuid::new_v4(),
                "name": "Club Default",
                "club_id": Uuid::nil(),
                "is_club_default": true,
                "overrides": [
                    {"rule_id": goal_scored_id, "is_enabled": true},
                    {"rule_id": clean_sheet_id, "is_enabled": true}
                ]
            },
            "match_facts": {"goals_for": 2, "goals_against": 0},
            "players": [
                {"player_id": keeper_id, "position": "GOALKEEPER", "played": true, "saves": 3},
                {"player_id": striker_id, "position": "FORWARD", "played": true, "goals_scored": 2}
            ],
            "manual_assignments": [
                {"rule_id": goal_scored_id, "player_id": striker_id, "count": 2}
            ],
            "completed_at": "2026-03-14T16:00:00Z"
        })
    }

    #[test]
    fn test_complete_match_dual_profile_scenario() {
        let request = scenario_request(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
        );

        let response = complete_match_json(&request.to_string()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();

        assert_eq!(parsed["schema_version"], 1);
        // Manual: 2x4 team / 2x3 club. Automatic clean sheet: 4 per profile.
        assert_eq!(parsed["team_points_total"], 12);
        assert_eq!(parsed["club_points_total"], 10);

        let ledger = parsed["snapshot"]["ledger"].as_array().unwrap();
        let manual: Vec<_> = ledger.iter().filter(|e| e["is_manual"] == true).collect();
        let automatic: Vec<_> = ledger.iter().filter(|e| e["is_manual"] == false).collect();

        let manual_total = |point_type: &str| -> i64 {
            manual
                .iter()
                .filter(|e| e["point_type"] == point_type)
                .map(|e| e["points"].as_i64().unwrap())
                .sum()
        };
        assert_eq!(manual_total("TEAM"), 8);
        assert_eq!(manual_total("CLUB"), 6);

        assert_eq!(automatic.len(), 2, "one clean-sheet row per profile");
        assert!(automatic.iter().all(|e| e["points"] == 4));

        let stats = parsed["snapshot"]["stats"].as_array().unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(parsed["snapshot"]["status"], "COMPLETED");
    }

    #[test]
    fn test_recompleting_identical_payload_returns_identical_ledger() {
        let request = scenario_request(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
        )
        .to_string();

        let first = complete_match_json(&request).unwrap();
        let second = complete_match_json(&request).unwrap();
        assert_eq!(first, second, "identical payload must rebuild an identical ledger");
    }

    #[test]
    fn test_completion_and_reconcile_round_trip() {
        let striker_id = Uuid::new_v4();
        let goal_scored_id = Uuid::new_v4();
        let request = scenario_request(
            Uuid::new_v4(),
            goal_scored_id,
            Uuid::new_v4(),
            Uuid::new_v4(),
            striker_id,
        );

        let response = complete_match_json(&request.to_string()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();

        let reconcile_request = json!({
            "schema_version": 1,
            "entries": parsed["snapshot"]["ledger"],
        });
        let reconciled = reconcile_match_json(&reconcile_request.to_string()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&reconciled).unwrap();

        let assignments = parsed["assignments"].as_array().unwrap();
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0]["rule_id"], json!(goal_scored_id));
        assert_eq!(assignments[0]["player_id"], json!(striker_id));
        assert_eq!(assignments[0]["count"], 2);
        // Team row wins the tie, so the per-instance value is the override.
        assert_eq!(assignments[0]["points_per_instance"], 4);
    }

    #[test]
    fn test_completion_rejects_invalid_rules() {
        let request = json!({
            "schema_version": 1,
            "match_id": Uuid::new_v4(),
            "rules": [{
                "id": Uuid::new_v4(),
                "team_id": Uuid::nil(),
                "name": "Broken",
                "description": "",
                "category": "RESULT",
                "conditions": [],
                "points_awarded": 1,
                "scope": "ALL_PLAYERS"
            }],
            "match_facts": {"goals_for": 1, "goals_against": 0},
            "players": []
        });
        let err = complete_match_json(&request.to_string()).unwrap_err();
        match err {
            ScoreError::Validation(message) => {
                assert!(message.contains("Broken"), "{}", message);
                assert!(message.contains("condition"), "{}", message);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_preview_reports_multiplied_points() {
        let striker_id = Uuid::new_v4();
        let request = json!({
            "schema_version": 1,
            "rules": [{
                "id": Uuid::new_v4(),
                "team_id": Uuid::nil(),
                "name": "Goal Scored",
                "description": "Per goal",
                "category": "PERFORMANCE",
                "conditions": [
                    {"variable": "goalsScored", "operator": ">", "value": 0, "scope": "PLAYER"}
                ],
                "award": {"type": "MULTIPLIED_BY", "variable": "goalsScored"},
                "points_awarded": 3,
                "scope": "ALL_PLAYERS"
            }],
            "match_facts": {"goals_for": 2, "goals_against": 1},
            "players": [
                {"player_id": striker_id, "position": "FORWARD", "played": true, "goals_scored": 2}
            ]
        });

        let response = preview_rules_json(&request.to_string()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
        let results = parsed["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["points"], 6);
        assert_eq!(results[0]["player_id"], json!(striker_id));
    }
}
