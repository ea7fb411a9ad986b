//! JSON API for host-application integration.
//!
//! Self-contained requests: each payload carries the rules, profiles, and
//! facts it needs, so request handlers stay a thin pass-through over their
//! own storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::completion::assembler::{CompletionInput, LedgerAssembler};
use crate::completion::reconciler::{reconcile_manual_assignments, ReconciledAssignment};
use crate::engine::rule::RuleEvaluator;
use crate::engine::variables::VariableRegistry;
use crate::error::{Result, ScoreError};
use crate::models::facts::{MatchFacts, PlayerFacts};
use crate::models::ledger::{
    points_total, CompletionSnapshot, ManualAssignment, PlayerRuleResult, PointLedgerEntry,
    PointType,
};
use crate::models::profile::RulesProfile;
use crate::models::rule::Rule;
use crate::models::variable::CustomVariable;
use crate::validation::RuleValidator;
use crate::SCHEMA_VERSION;

// ============================================================================
// Requests / responses
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub schema_version: u8,
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub custom_variables: Vec<CustomVariable>,
    pub match_facts: MatchFacts,
    pub players: Vec<PlayerFacts>,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub schema_version: u8,
    pub results: Vec<PlayerRuleResult>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionRequest {
    pub schema_version: u8,
    pub match_id: Uuid,
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub custom_variables: Vec<CustomVariable>,
    #[serde(default)]
    pub team_profile: Option<RulesProfile>,
    #[serde(default)]
    pub club_profile: Option<RulesProfile>,
    pub match_facts: MatchFacts,
    pub players: Vec<PlayerFacts>,
    #[serde(default)]
    pub manual_assignments: Vec<ManualAssignment>,
    /// Defaults to the current time when omitted.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    pub schema_version: u8,
    pub snapshot: CompletionSnapshot,
    pub team_points_total: i32,
    pub club_points_total: i32,
}

#[derive(Debug, Deserialize)]
pub struct ReconcileRequest {
    pub schema_version: u8,
    pub entries: Vec<PointLedgerEntry>,
}

#[derive(Debug, Serialize)]
pub struct ReconcileResponse {
    pub schema_version: u8,
    pub assignments: Vec<ReconciledAssignment>,
}

#[derive(Debug, Deserialize)]
pub struct ValidateRulesRequest {
    pub schema_version: u8,
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub profiles: Vec<RulesProfile>,
}

#[derive(Debug, Serialize)]
pub struct ValidateRulesResponse {
    pub schema_version: u8,
    pub errors: Vec<String>,
}

fn ensure_schema(found: u8) -> Result<()> {
    if found != SCHEMA_VERSION {
        return Err(ScoreError::SchemaVersion { found, expected: SCHEMA_VERSION });
    }
    Ok(())
}

// ============================================================================
// Public API
// ============================================================================

/// Evaluate automatic rules against supplied facts, without persistence.
///
/// Backs the rule-testing screen; manual rules contribute nothing here.
pub fn preview_rules_json(request_json: &str) -> Result<String> {
    let request: PreviewRequest = serde_json::from_str(request_json)?;
    ensure_schema(request.schema_version)?;

    let registry = VariableRegistry::with_customs(request.custom_variables);
    let evaluator = RuleEvaluator::new(&registry);
    let results = evaluator.evaluate_all(&request.rules, &request.match_facts, &request.players);

    let response = PreviewResponse { schema_version: SCHEMA_VERSION, results };
    Ok(serde_json::to_string(&response)?)
}

/// Build the completion snapshot for a match payload.
///
/// Structurally invalid rules fail the whole request with the aggregated
/// error list; the caller commits the returned snapshot through its own
/// [`crate::completion::CompletionStore`] in one transaction.
pub fn complete_match_json(request_json: &str) -> Result<String> {
    let request: CompletionRequest = serde_json::from_str(request_json)?;
    ensure_schema(request.schema_version)?;

    let rule_errors = collect_rule_errors(&request.rules);
    if !rule_errors.is_empty() {
        return Err(ScoreError::Validation(rule_errors.join("; ")));
    }

    let registry = VariableRegistry::with_customs(request.custom_variables);
    let assembler = LedgerAssembler::new(&request.rules, &registry);
    let input = CompletionInput {
        match_id: request.match_id,
        match_facts: request.match_facts,
        players: request.players,
        manual_assignments: request.manual_assignments,
        completed_at: request.completed_at.unwrap_or_else(Utc::now),
    };
    let snapshot =
        assembler.assemble(&input, request.team_profile.as_ref(), request.club_profile.as_ref());

    let response = CompletionResponse {
        schema_version: SCHEMA_VERSION,
        team_points_total: points_total(&snapshot.ledger, PointType::Team),
        club_points_total: points_total(&snapshot.ledger, PointType::Club),
        snapshot,
    };
    Ok(serde_json::to_string(&response)?)
}

/// Rebuild editable manual counts from a match's persisted ledger rows.
pub fn reconcile_match_json(request_json: &str) -> Result<String> {
    let request: ReconcileRequest = serde_json::from_str(request_json)?;
    ensure_schema(request.schema_version)?;

    let assignments = reconcile_manual_assignments(&request.entries);
    let response = ReconcileResponse { schema_version: SCHEMA_VERSION, assignments };
    Ok(serde_json::to_string(&response)?)
}

/// Pre-save validation for the rule editor: every structural problem with
/// the submitted rules and profiles, as human-readable strings. The caller
/// decides whether to block the save.
pub fn validate_rules_json(request_json: &str) -> Result<String> {
    let request: ValidateRulesRequest = serde_json::from_str(request_json)?;
    ensure_schema(request.schema_version)?;

    let mut errors = collect_rule_errors(&request.rules);
    errors.extend(
        RuleValidator::validate_profiles(&request.profiles).iter().map(|e| e.to_string()),
    );

    let response = ValidateRulesResponse { schema_version: SCHEMA_VERSION, errors };
    Ok(serde_json::to_string(&response)?)
}

fn collect_rule_errors(rules: &[Rule]) -> Vec<String> {
    let mut errors = Vec::new();
    for rule in rules {
        for error in RuleValidator::validate(rule) {
            let label = if rule.name.trim().is_empty() {
                rule.id.to_string()
            } else {
                rule.name.clone()
            };
            errors.push(format!("{}: {}", label, error));
        }
    }
    errors
}
