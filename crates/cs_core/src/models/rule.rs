//! Scoring rules: a named condition set mapped to a point award, scoped to
//! a team and restricted to a target player set.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::condition::Condition;
use super::position::Position;

/// How a rule's points are computed for a qualifying player.
///
/// The multiplier source is an explicit reference, never inferred from the
/// shape of the rule's conditions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PointAward {
    /// `points_awarded` once per qualifying player.
    #[default]
    Flat,
    /// `points_awarded` multiplied by the player's value of `variable`.
    MultipliedBy { variable: String },
}

/// Rule category with its category-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleKind {
    /// Awarded from the match outcome alone; every condition is checked
    /// against match facts.
    Result { conditions: Vec<Condition> },
    /// Evaluated per player; conditions may mix MATCH and PLAYER scope.
    Performance {
        conditions: Vec<Condition>,
        #[serde(default)]
        award: PointAward,
    },
    /// Never auto-evaluated; points enter the ledger only through manual
    /// assignments collected by the completion wizard.
    Manual,
}

/// Player-selection policy of a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetScope {
    AllPlayers,
    ByPosition { positions: Vec<Position> },
    IndividualPlayer { player_id: Uuid },
}

/// A team-owned scoring rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: Uuid,
    pub team_id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub kind: RuleKind,
    pub points_awarded: i32,
    #[serde(flatten)]
    pub target: TargetScope,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Rule {
    /// Condition set of the rule; empty for manual rules.
    pub fn conditions(&self) -> &[Condition] {
        match &self.kind {
            RuleKind::Result { conditions } => conditions,
            RuleKind::Performance { conditions, .. } => conditions,
            RuleKind::Manual => &[],
        }
    }

    /// Whether the rule participates in automatic evaluation.
    pub fn is_automatic(&self) -> bool {
        !matches!(self.kind, RuleKind::Manual)
    }
}
