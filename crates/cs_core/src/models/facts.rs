//! Match fact sets: the ephemeral inputs evaluation runs against.
//!
//! These are supplied by the completion workflow per request and are not
//! owned entities.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::position::Position;
use super::variable::{keys, VariableValue};

/// Match-scope facts: the final score plus any custom match-scope values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchFacts {
    pub goals_for: u32,
    pub goals_against: u32,
    /// Custom match-scope variable values keyed by variable key.
    #[serde(default)]
    pub values: HashMap<String, VariableValue>,
}

impl MatchFacts {
    pub fn new(goals_for: u32, goals_against: u32) -> Self {
        Self { goals_for, goals_against, values: HashMap::new() }
    }

    /// Value of a match-scope variable, built-ins first.
    pub fn value_of(&self, key: &str) -> Option<VariableValue> {
        match key {
            keys::GOALS_FOR => Some(VariableValue::Number(self.goals_for as f64)),
            keys::GOALS_AGAINST => Some(VariableValue::Number(self.goals_against as f64)),
            _ => self.values.get(key).cloned(),
        }
    }
}

/// Player-scope facts for one participating player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerFacts {
    pub player_id: Uuid,
    pub position: Position,
    #[serde(default)]
    pub played: bool,
    #[serde(default)]
    pub goals_scored: u32,
    #[serde(default)]
    pub goal_assists: u32,
    #[serde(default)]
    pub cards: u32,
    #[serde(default)]
    pub saves: u32,
    #[serde(default)]
    pub tackles: u32,
    /// Custom player-scope variable values keyed by variable key.
    #[serde(default)]
    pub values: HashMap<String, VariableValue>,
}

impl PlayerFacts {
    pub fn new(player_id: Uuid, position: Position) -> Self {
        Self {
            player_id,
            position,
            played: true,
            goals_scored: 0,
            goal_assists: 0,
            cards: 0,
            saves: 0,
            tackles: 0,
            values: HashMap::new(),
        }
    }

    /// Value of a player-scope variable, built-ins first.
    pub fn value_of(&self, key: &str) -> Option<VariableValue> {
        match key {
            keys::GOALS_SCORED => Some(VariableValue::Number(self.goals_scored as f64)),
            keys::GOAL_ASSISTS => Some(VariableValue::Number(self.goal_assists as f64)),
            keys::CARDS => Some(VariableValue::Number(self.cards as f64)),
            keys::SAVES => Some(VariableValue::Number(self.saves as f64)),
            keys::TACKLES => Some(VariableValue::Number(self.tackles as f64)),
            keys::POSITION => Some(VariableValue::Position(self.position)),
            keys::PLAYED => Some(VariableValue::Bool(self.played)),
            _ => self.values.get(key).cloned(),
        }
    }
}
