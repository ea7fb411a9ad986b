//! Rule evaluation: category dispatch, condition checks, point math, and
//! target resolution, producing one result per qualifying (player, rule)
//! pair.

use super::condition::{decode_position_literal, ConditionEvaluator};
use super::target::resolve_targets;
use super::variables::VariableRegistry;
use crate::models::condition::Condition;
use crate::models::facts::{MatchFacts, PlayerFacts};
use crate::models::ledger::PlayerRuleResult;
use crate::models::rule::{PointAward, Rule, RuleKind};
use crate::models::variable::{keys, VariableScope, VariableValue};

pub struct RuleEvaluator<'a> {
    conditions: ConditionEvaluator<'a>,
}

impl<'a> RuleEvaluator<'a> {
    pub fn new(registry: &'a VariableRegistry) -> Self {
        Self { conditions: ConditionEvaluator::new(registry) }
    }

    /// Evaluate every active rule against one match's facts.
    ///
    /// The result multiset is independent of rule ordering; manual rules
    /// contribute nothing here.
    pub fn evaluate_all(
        &self,
        rules: &[Rule],
        match_facts: &MatchFacts,
        players: &[PlayerFacts],
    ) -> Vec<PlayerRuleResult> {
        rules
            .iter()
            .filter(|rule| rule.is_active)
            .flat_map(|rule| self.evaluate_rule(rule, match_facts, players))
            .collect()
    }

    /// Evaluate one rule with its own base point value.
    pub fn evaluate_rule(
        &self,
        rule: &Rule,
        match_facts: &MatchFacts,
        players: &[PlayerFacts],
    ) -> Vec<PlayerRuleResult> {
        self.evaluate_rule_with_points(rule, rule.points_awarded, match_facts, players)
    }

    /// Evaluate one rule with a substituted base point value (used when a
    /// profile overrides the rule's points).
    pub fn evaluate_rule_with_points(
        &self,
        rule: &Rule,
        base_points: i32,
        match_facts: &MatchFacts,
        players: &[PlayerFacts],
    ) -> Vec<PlayerRuleResult> {
        if !rule.is_active {
            return Vec::new();
        }
        match &rule.kind {
            RuleKind::Result { conditions } => {
                self.evaluate_result(rule, conditions, base_points, match_facts, players)
            }
            RuleKind::Performance { conditions, award } => {
                self.evaluate_performance(rule, conditions, award, base_points, match_facts, players)
            }
            RuleKind::Manual => Vec::new(),
        }
    }

    /// Result rules check match facts alone; a PLAYER-scope condition in a
    /// result rule can never pass. On success the award goes once to every
    /// target player, not once per condition.
    fn evaluate_result(
        &self,
        rule: &Rule,
        conditions: &[Condition],
        base_points: i32,
        match_facts: &MatchFacts,
        players: &[PlayerFacts],
    ) -> Vec<PlayerRuleResult> {
        let all_pass =
            conditions.iter().all(|c| self.conditions.evaluate(c, match_facts, None));
        if !all_pass {
            return Vec::new();
        }
        let reason = self.describe_conditions(conditions, match_facts, None);
        resolve_targets(&rule.target, players)
            .into_iter()
            .map(|player| PlayerRuleResult {
                player_id: player.player_id,
                rule_id: rule.id,
                points: base_points,
                reason: reason.clone(),
            })
            .collect()
    }

    /// Performance rules run independently per target player and may mix
    /// MATCH- and PLAYER-scope conditions.
    fn evaluate_performance(
        &self,
        rule: &Rule,
        conditions: &[Condition],
        award: &PointAward,
        base_points: i32,
        match_facts: &MatchFacts,
        players: &[PlayerFacts],
    ) -> Vec<PlayerRuleResult> {
        let mut results = Vec::new();
        for player in resolve_targets(&rule.target, players) {
            let all_pass = conditions
                .iter()
                .all(|c| self.conditions.evaluate(c, match_facts, Some(player)));
            if !all_pass {
                continue;
            }
            let mut reason = self.describe_conditions(conditions, match_facts, Some(player));
            let points = match award {
                PointAward::Flat => base_points,
                PointAward::MultipliedBy { variable } => {
                    let units = self.multiplier_units(variable, match_facts, player);
                    reason.push_str(&format!("; {} x {} {}", base_points, units, variable));
                    base_points * units
                }
            };
            results.push(PlayerRuleResult {
                player_id: player.player_id,
                rule_id: rule.id,
                points,
                reason,
            });
        }
        results
    }

    /// Actual units of the multiplier variable for one player, fail-open
    /// to zero for missing or non-numeric values.
    fn multiplier_units(
        &self,
        variable: &str,
        match_facts: &MatchFacts,
        player: &PlayerFacts,
    ) -> i32 {
        self.conditions
            .operand_value(variable, VariableScope::Player, match_facts, Some(player))
            .and_then(|v| v.as_number())
            .map(|n| n.round() as i32)
            .unwrap_or(0)
    }

    fn describe_conditions(
        &self,
        conditions: &[Condition],
        match_facts: &MatchFacts,
        player: Option<&PlayerFacts>,
    ) -> String {
        conditions
            .iter()
            .map(|c| self.describe_condition(c, match_facts, player))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn describe_condition(
        &self,
        condition: &Condition,
        match_facts: &MatchFacts,
        player: Option<&PlayerFacts>,
    ) -> String {
        let actual = self
            .conditions
            .operand_value(&condition.variable, condition.scope, match_facts, player)
            .unwrap_or_default();
        if let Some(compare_key) = &condition.compare_variable {
            let other = self
                .conditions
                .operand_value(compare_key, condition.scope, match_facts, player)
                .unwrap_or_default();
            format!(
                "{} {} {} ({} vs {})",
                condition.variable, condition.operator, compare_key, actual, other
            )
        } else {
            let literal = if condition.variable == keys::POSITION {
                match decode_position_literal(condition.value) {
                    Some(position) => position.to_string(),
                    None => format!("#{}", condition.value),
                }
            } else {
                VariableValue::Number(condition.value).to_string()
            };
            format!(
                "{} {} {} (actual {})",
                condition.variable, condition.operator, literal, actual
            )
        }
    }
}
