//! Variable registry: built-ins merged functionally with team customs.

use crate::data::variables::find_builtin;
use crate::models::variable::{CustomVariable, VariableDescriptor, VariableScope};

/// Lookup facade over the built-in variable table and a team's custom
/// variable definitions.
///
/// Built-ins shadow customs of the same key. Inactive customs never
/// resolve. Unknown keys resolve to `None`; evaluators treat that as a safe
/// default value rather than an error, so a dangling reference in a rule
/// never aborts evaluation.
#[derive(Debug, Default)]
pub struct VariableRegistry {
    customs: Vec<CustomVariable>,
}

impl VariableRegistry {
    /// Registry with built-ins only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with built-ins plus a team's custom variables.
    pub fn with_customs(customs: Vec<CustomVariable>) -> Self {
        Self { customs }
    }

    pub fn resolve(&self, key: &str, scope: VariableScope) -> Option<VariableDescriptor> {
        if let Some(builtin) = find_builtin(key, scope) {
            return Some(builtin.clone());
        }
        self.customs
            .iter()
            .find(|v| v.is_active && v.key == key && v.scope == scope)
            .map(CustomVariable::descriptor)
    }
}
