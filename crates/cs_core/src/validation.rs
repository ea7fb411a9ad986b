//! Structural validation for rules and profiles, run before save.
//!
//! Errors aggregate into a list so the rule editor can show every problem
//! at once; the caller decides whether to block the save.

use std::fmt;

use uuid::Uuid;

use crate::models::profile::RulesProfile;
use crate::models::rule::{Rule, TargetScope};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Rule name is required
    MissingName,

    /// Rule description is required
    MissingDescription,

    /// Non-manual rule with an empty condition list
    NoConditions,

    /// BY_POSITION target with no positions selected
    NoTargetPositions,

    /// INDIVIDUAL_PLAYER target without a concrete player
    MissingTargetPlayer,

    /// Condition with an empty variable key
    EmptyConditionVariable { index: usize },

    /// Condition comparing against an empty variable key
    EmptyCompareVariable { index: usize },

    /// More than one club-default profile for the same club
    DuplicateClubDefault { club_id: Uuid },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingName => write!(f, "Rule name is required"),
            ValidationError::MissingDescription => write!(f, "Rule description is required"),
            ValidationError::NoConditions => {
                write!(f, "Result and performance rules need at least one condition")
            }
            ValidationError::NoTargetPositions => {
                write!(f, "Position-targeted rules need at least one target position")
            }
            ValidationError::MissingTargetPlayer => {
                write!(f, "Individual-player rules need a target player")
            }
            ValidationError::EmptyConditionVariable { index } => {
                write!(f, "Condition {}: variable is required", index + 1)
            }
            ValidationError::EmptyCompareVariable { index } => {
                write!(f, "Condition {}: comparison variable is required", index + 1)
            }
            ValidationError::DuplicateClubDefault { club_id } => {
                write!(f, "Club {} has more than one default profile", club_id)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Rule and profile validation utility.
pub struct RuleValidator;

impl RuleValidator {
    /// Every structural problem with one rule, in display order.
    pub fn validate(rule: &Rule) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if rule.name.trim().is_empty() {
            errors.push(ValidationError::MissingName);
        }
        if rule.description.trim().is_empty() {
            errors.push(ValidationError::MissingDescription);
        }

        if rule.is_automatic() && rule.conditions().is_empty() {
            errors.push(ValidationError::NoConditions);
        }
        for (index, condition) in rule.conditions().iter().enumerate() {
            if condition.variable.trim().is_empty() {
                errors.push(ValidationError::EmptyConditionVariable { index });
            }
            if let Some(compare) = &condition.compare_variable {
                if compare.trim().is_empty() {
                    errors.push(ValidationError::EmptyCompareVariable { index });
                }
            }
        }

        match &rule.target {
            TargetScope::ByPosition { positions } if positions.is_empty() => {
                errors.push(ValidationError::NoTargetPositions);
            }
            TargetScope::IndividualPlayer { player_id } if player_id.is_nil() => {
                errors.push(ValidationError::MissingTargetPlayer);
            }
            _ => {}
        }

        errors
    }

    /// Cross-profile invariant: at most one club default per club.
    pub fn validate_profiles(profiles: &[RulesProfile]) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut seen_defaults: Vec<Uuid> = Vec::new();
        for profile in profiles.iter().filter(|p| p.is_club_default) {
            if seen_defaults.contains(&profile.club_id) {
                if !errors
                    .iter()
                    .any(|e| matches!(e, ValidationError::DuplicateClubDefault { club_id } if *club_id == profile.club_id))
                {
                    errors.push(ValidationError::DuplicateClubDefault { club_id: profile.club_id });
                }
            } else {
                seen_defaults.push(profile.club_id);
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::condition::{ComparisonOp, Condition};
    use crate::models::rule::RuleKind;
    use crate::models::variable::{keys, VariableScope};

    fn valid_rule() -> Rule {
        Rule {
            id: Uuid::new_v4(),
            team_id: Uuid::new_v4(),
            name: "Won the match".to_string(),
            description: "Awarded to the full squad on a win".to_string(),
            kind: RuleKind::Result {
                conditions: vec![Condition::between(
                    keys::GOALS_FOR,
                    ComparisonOp::Greater,
                    keys::GOALS_AGAINST,
                    VariableScope::Match,
                )],
            },
            points_awarded: 2,
            target: TargetScope::AllPlayers,
            is_active: true,
        }
    }

    #[test]
    fn test_valid_rule_has_no_errors() {
        assert!(RuleValidator::validate(&valid_rule()).is_empty());
    }

    #[test]
    fn test_missing_name_and_description_aggregate() {
        let mut rule = valid_rule();
        rule.name = "  ".to_string();
        rule.description = String::new();
        let errors = RuleValidator::validate(&rule);
        assert_eq!(
            errors,
            vec![ValidationError::MissingName, ValidationError::MissingDescription]
        );
    }

    #[test]
    fn test_automatic_rule_requires_conditions() {
        let mut rule = valid_rule();
        rule.kind = RuleKind::Result { conditions: vec![] };
        assert!(RuleValidator::validate(&rule).contains(&ValidationError::NoConditions));

        // Manual rules never carry conditions.
        rule.kind = RuleKind::Manual;
        assert!(RuleValidator::validate(&rule).is_empty());
    }

    #[test]
    fn test_by_position_requires_positions() {
        let mut rule = valid_rule();
        rule.target = TargetScope::ByPosition { positions: vec![] };
        assert!(RuleValidator::validate(&rule).contains(&ValidationError::NoTargetPositions));
    }

    #[test]
    fn test_individual_target_requires_player() {
        let mut rule = valid_rule();
        rule.target = TargetScope::IndividualPlayer { player_id: Uuid::nil() };
        assert!(RuleValidator::validate(&rule).contains(&ValidationError::MissingTargetPlayer));
    }

    #[test]
    fn test_empty_condition_variables_report_index() {
        let mut rule = valid_rule();
        rule.kind = RuleKind::Result {
            conditions: vec![
                Condition::between(keys::GOALS_FOR, ComparisonOp::Greater, "", VariableScope::Match),
                Condition::literal("", ComparisonOp::Equal, 1.0, VariableScope::Match),
            ],
        };
        let errors = RuleValidator::validate(&rule);
        assert!(errors.contains(&ValidationError::EmptyCompareVariable { index: 0 }));
        assert!(errors.contains(&ValidationError::EmptyConditionVariable { index: 1 }));
    }

    #[test]
    fn test_duplicate_club_default_detected() {
        let club_id = Uuid::new_v4();
        let make = |is_default| RulesProfile {
            id: Uuid::new_v4(),
            name: "Profile".to_string(),
            club_id,
            is_club_default: is_default,
            overrides: vec![],
        };
        assert!(RuleValidator::validate_profiles(&[make(true), make(false)]).is_empty());
        assert_eq!(
            RuleValidator::validate_profiles(&[make(true), make(true)]),
            vec![ValidationError::DuplicateClubDefault { club_id }]
        );
    }

    #[test]
    fn test_error_messages_are_human_readable() {
        assert_eq!(ValidationError::MissingName.to_string(), "Rule name is required");
        assert_eq!(
            ValidationError::EmptyConditionVariable { index: 2 }.to_string(),
            "Condition 3: variable is required"
        );
    }
}
