//! Point ledger rows and the completion snapshot.
//!
//! Ledger entries are created in one batch at match-completion time; the
//! full batch for a match is atomically replaced on re-completion and never
//! incrementally patched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::facts::PlayerFacts;
use super::position::Position;

/// Which default profile produced a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PointType {
    Team,
    Club,
}

/// Lifecycle status of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    Completed,
}

/// One automatic evaluation outcome for preview and audit display.
///
/// `reason` is a human-readable trace of the conditions and actual values
/// that fired the rule; it is not semantically load-bearing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRuleResult {
    pub player_id: Uuid,
    pub rule_id: Uuid,
    pub points: i32,
    pub reason: String,
}

/// A captain-entered count of rule occurrences for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualAssignment {
    pub rule_id: Uuid,
    pub player_id: Uuid,
    pub count: u32,
}

/// One persisted point award tied to a player, match, rule, and profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLedgerEntry {
    pub player_id: Uuid,
    pub match_id: Uuid,
    pub rule_id: Uuid,
    pub points: i32,
    pub point_type: PointType,
    pub profile_id: Uuid,
    /// Links the TEAM/CLUB sibling rows produced by one manual assignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment_id: Option<Uuid>,
    /// First-class instance count. Rows persisted before this column
    /// existed carry 0 here and encode the count in `notes` instead.
    #[serde(default)]
    pub instance_count: u32,
    #[serde(default)]
    pub is_manual: bool,
    #[serde(default)]
    pub notes: String,
}

/// Per-player statistic row persisted alongside the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatRow {
    pub match_id: Uuid,
    pub player_id: Uuid,
    pub position: Position,
    pub played: bool,
    pub goals_scored: u32,
    pub goal_assists: u32,
    pub cards: u32,
    pub saves: u32,
    pub tackles: u32,
}

impl PlayerStatRow {
    pub fn from_facts(match_id: Uuid, facts: &PlayerFacts) -> Self {
        Self {
            match_id,
            player_id: facts.player_id,
            position: facts.position,
            played: facts.played,
            goals_scored: facts.goals_scored,
            goal_assists: facts.goal_assists,
            cards: facts.cards,
            saves: facts.saves,
            tackles: facts.tackles,
        }
    }
}

/// The full replacement set committed in one transaction when a match is
/// (re-)completed: score, stat rows, and ledger rows, all-or-nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionSnapshot {
    pub match_id: Uuid,
    pub goals_for: u32,
    pub goals_against: u32,
    pub status: MatchStatus,
    pub stats: Vec<PlayerStatRow>,
    pub ledger: Vec<PointLedgerEntry>,
    pub completed_at: DateTime<Utc>,
}

/// Sum of ledger points for one point type.
pub fn points_total(entries: &[PointLedgerEntry], point_type: PointType) -> i32 {
    entries.iter().filter(|e| e.point_type == point_type).map(|e| e.points).sum()
}
