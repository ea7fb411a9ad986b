//! Condition evaluation against match and player fact sets.

use super::variables::VariableRegistry;
use crate::models::condition::{ComparisonOp, Condition};
use crate::models::facts::{MatchFacts, PlayerFacts};
use crate::models::position::Position;
use crate::models::variable::{keys, VariableScope, VariableValue};

/// Evaluates one condition at a time.
///
/// Resolution is fail-open: an unresolved variable key reads as the
/// registry default, or zero when nothing resolves, so one malformed
/// condition never aborts evaluation of the surrounding rule set.
pub struct ConditionEvaluator<'a> {
    registry: &'a VariableRegistry,
}

impl<'a> ConditionEvaluator<'a> {
    pub fn new(registry: &'a VariableRegistry) -> Self {
        Self { registry }
    }

    /// Whether the condition holds for the supplied facts.
    ///
    /// A PLAYER-scope condition evaluated without player context is false.
    pub fn evaluate(
        &self,
        condition: &Condition,
        match_facts: &MatchFacts,
        player_facts: Option<&PlayerFacts>,
    ) -> bool {
        let left = match self.operand_value(&condition.variable, condition.scope, match_facts, player_facts)
        {
            Some(value) => value,
            None => return false,
        };

        let right = if let Some(compare_key) = &condition.compare_variable {
            // Variable-vs-variable comparison reads both sides from the
            // condition's own scope.
            match self.operand_value(compare_key, condition.scope, match_facts, player_facts) {
                Some(value) => value,
                None => return false,
            }
        } else if condition.variable == keys::POSITION {
            match decode_position_literal(condition.value) {
                Some(position) => VariableValue::Position(position),
                None => return false,
            }
        } else {
            VariableValue::Number(condition.value)
        };

        compare(condition.operator, &left, &right)
    }

    /// Resolved left-hand value of a variable for the given facts.
    ///
    /// `None` only when a PLAYER-scope lookup has no player context;
    /// unknown keys fall open to the registry default or zero.
    pub(crate) fn operand_value(
        &self,
        key: &str,
        scope: VariableScope,
        match_facts: &MatchFacts,
        player_facts: Option<&PlayerFacts>,
    ) -> Option<VariableValue> {
        let fact = match scope {
            VariableScope::Match => match_facts.value_of(key),
            VariableScope::Player => player_facts?.value_of(key),
        };
        Some(
            fact.or_else(|| self.registry.resolve(key, scope).map(|d| d.default))
                .unwrap_or_default(),
        )
    }
}

/// Position literals are integer codes 1..=4; anything else has no mapping.
pub(crate) fn decode_position_literal(value: f64) -> Option<Position> {
    if value.fract() != 0.0 || !(0.0..=255.0).contains(&value) {
        return None;
    }
    Position::from_code(value as u8)
}

/// Type-aware comparison.
///
/// Numbers support all six operators; booleans, positions, and enum text
/// support equality only. A numeric operand against a boolean coerces the
/// number (non-zero is true), since literals are always authored as
/// numbers. Any other type mismatch is false.
fn compare(op: ComparisonOp, left: &VariableValue, right: &VariableValue) -> bool {
    use VariableValue::{Bool, Number, Position as Pos, Text};
    match (left, right) {
        (Number(l), Number(r)) => compare_numbers(op, *l, *r),
        (Bool(l), Bool(r)) => compare_equality(op, l == r),
        (Bool(l), Number(r)) => compare_equality(op, *l == (*r != 0.0)),
        (Number(l), Bool(r)) => compare_equality(op, (*l != 0.0) == *r),
        (Pos(l), Pos(r)) => compare_equality(op, l == r),
        (Text(l), Text(r)) => compare_equality(op, l == r),
        _ => false,
    }
}

fn compare_numbers(op: ComparisonOp, left: f64, right: f64) -> bool {
    match op {
        ComparisonOp::Greater => left > right,
        ComparisonOp::Equal => left == right,
        ComparisonOp::Less => left < right,
        ComparisonOp::GreaterEqual => left >= right,
        ComparisonOp::LessEqual => left <= right,
        ComparisonOp::NotEqual => left != right,
    }
}

fn compare_equality(op: ComparisonOp, equal: bool) -> bool {
    match op {
        ComparisonOp::Equal => equal,
        ComparisonOp::NotEqual => !equal,
        _ => false,
    }
}
