//! Built-in variable table loading.
//!
//! The table is embedded at compile time and parsed once on first use.

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::models::variable::{VariableDescriptor, VariableScope};

// =============================================================================
// Embedded YAML Data
// =============================================================================

/// Built-in variable table (compile-time embedded).
pub const BUILTIN_VARIABLES_YAML: &str =
    include_str!("../../../../data/variables/builtin.yaml");

#[derive(Debug, Deserialize)]
struct BuiltinVariableData {
    variables: Vec<VariableDescriptor>,
}

static BUILTIN_VARIABLES: Lazy<Vec<VariableDescriptor>> = Lazy::new(|| {
    let data: BuiltinVariableData = serde_yaml::from_str(BUILTIN_VARIABLES_YAML)
        .expect("Failed to parse data/variables/builtin.yaml");
    data.variables
        .into_iter()
        .map(|mut descriptor| {
            descriptor.is_builtin = true;
            descriptor
        })
        .collect()
});

// =============================================================================
// Public API
// =============================================================================

/// All built-in variable descriptors.
///
/// # Panics
///
/// Panics if the embedded YAML fails to parse (cannot happen on a normal
/// build since the data is embedded at compile time).
pub fn builtin_variables() -> &'static [VariableDescriptor] {
    &BUILTIN_VARIABLES
}

/// Built-in descriptor for `key` at `scope`, if one exists.
pub fn find_builtin(key: &str, scope: VariableScope) -> Option<&'static VariableDescriptor> {
    builtin_variables().iter().find(|d| d.key == key && d.scope == scope)
}
