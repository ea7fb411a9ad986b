//! Rules profiles: club-owned bundles of per-rule overrides used to compute
//! one leaderboard's totals.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::rule::Rule;

/// Per-rule override inside a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOverride {
    pub rule_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_points: Option<i32>,
    pub is_enabled: bool,
}

/// A named bundle of rule overrides layered on the global rule set.
///
/// A team references exactly one default profile; a club has at most one
/// profile with `is_club_default` used for club-wide comparisons. A profile
/// considers a rule only when it carries an enabled override for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesProfile {
    pub id: Uuid,
    pub name: String,
    pub club_id: Uuid,
    #[serde(default)]
    pub is_club_default: bool,
    #[serde(default)]
    pub overrides: Vec<RuleOverride>,
}

impl RulesProfile {
    pub fn override_for(&self, rule_id: Uuid) -> Option<&RuleOverride> {
        self.overrides.iter().find(|o| o.rule_id == rule_id)
    }

    pub fn is_enabled(&self, rule_id: Uuid) -> bool {
        self.override_for(rule_id).map(|o| o.is_enabled).unwrap_or(false)
    }

    /// Per-instance point value of `rule` under this profile, or `None`
    /// when the profile does not enable the rule.
    pub fn effective_points(&self, rule: &Rule) -> Option<i32> {
        let rule_override = self.override_for(rule.id)?;
        if !rule_override.is_enabled {
            return None;
        }
        Some(rule_override.custom_points.unwrap_or(rule.points_awarded))
    }
}
