//! Scoring variables: scope, data type, runtime values, and descriptors.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::position::Position;

/// Which fact set supplies a variable's value during evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariableScope {
    Match,
    Player,
}

/// Declared data type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariableType {
    Number,
    Boolean,
    Enum,
}

/// A concrete variable value carried by match or player facts.
///
/// Untagged so that JSON/YAML scalars map directly: numbers, booleans,
/// position names (`"GOALKEEPER"`), and free-form enum strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Number(f64),
    Bool(bool),
    Position(Position),
    Text(String),
}

impl Default for VariableValue {
    fn default() -> Self {
        VariableValue::Number(0.0)
    }
}

impl VariableValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            VariableValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for VariableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Integral values print without a trailing ".0" so audit traces
            // read like the counts they are.
            VariableValue::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            VariableValue::Number(n) => write!(f, "{}", n),
            VariableValue::Bool(b) => write!(f, "{}", b),
            VariableValue::Position(p) => write!(f, "{}", p),
            VariableValue::Text(s) => f.write_str(s),
        }
    }
}

/// Built-in variable keys.
///
/// Stable identifiers referenced by rule conditions; they exist implicitly
/// for every team and are never persisted.
pub mod keys {
    pub const GOALS_FOR: &str = "goalsFor";
    pub const GOALS_AGAINST: &str = "goalsAgainst";
    pub const GOALS_SCORED: &str = "goalsScored";
    pub const GOAL_ASSISTS: &str = "goalAssists";
    pub const CARDS: &str = "cards";
    pub const SAVES: &str = "saves";
    pub const TACKLES: &str = "tackles";
    pub const POSITION: &str = "position";
    pub const PLAYED: &str = "played";
}

/// Resolved description of a variable usable inside conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDescriptor {
    pub key: String,
    pub label: String,
    pub scope: VariableScope,
    pub data_type: VariableType,
    #[serde(default)]
    pub default: VariableValue,
    #[serde(default)]
    pub is_builtin: bool,
}

/// Team-authored variable definition.
///
/// Unlike built-ins these are persisted, owned by a team, and can be
/// deactivated. An inactive variable never resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomVariable {
    pub key: String,
    pub label: String,
    pub team_id: Uuid,
    pub scope: VariableScope,
    pub data_type: VariableType,
    #[serde(default)]
    pub default: VariableValue,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl CustomVariable {
    pub fn descriptor(&self) -> VariableDescriptor {
        VariableDescriptor {
            key: self.key.clone(),
            label: self.label.clone(),
            scope: self.scope,
            data_type: self.data_type,
            default: self.default.clone(),
            is_builtin: false,
        }
    }
}
