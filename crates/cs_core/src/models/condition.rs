//! Rule conditions: one comparison between a variable and a literal or
//! another variable of the same scope.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::variable::VariableScope;

/// Comparison operator of a condition.
///
/// Serialized as the operator symbol itself, matching how conditions are
/// authored in the rule editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOp {
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = ">=")]
    GreaterEqual,
    #[serde(rename = "<=")]
    LessEqual,
    #[serde(rename = "!=")]
    NotEqual,
}

impl ComparisonOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOp::Greater => ">",
            ComparisonOp::Equal => "==",
            ComparisonOp::Less => "<",
            ComparisonOp::GreaterEqual => ">=",
            ComparisonOp::LessEqual => "<=",
            ComparisonOp::NotEqual => "!=",
        }
    }

    /// Ordering operators are only meaningful for numeric operands;
    /// booleans and enums support equality checks alone.
    pub fn is_equality(&self) -> bool {
        matches!(self, ComparisonOp::Equal | ComparisonOp::NotEqual)
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One comparison inside a rule.
///
/// `scope` selects the fact set supplying the left-hand value. When
/// `compare_variable` is set the right-hand value is read from the **same**
/// scope and `value` is ignored. For the `position` variable the literal is
/// an integer code 1..=4 decoded before comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub variable: String,
    pub operator: ComparisonOp,
    #[serde(default)]
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_variable: Option<String>,
    pub scope: VariableScope,
}

impl Condition {
    /// Variable-vs-literal condition.
    pub fn literal(
        variable: impl Into<String>,
        operator: ComparisonOp,
        value: f64,
        scope: VariableScope,
    ) -> Self {
        Self { variable: variable.into(), operator, value, compare_variable: None, scope }
    }

    /// Variable-vs-variable condition; both sides read from `scope`.
    pub fn between(
        variable: impl Into<String>,
        operator: ComparisonOp,
        compare_variable: impl Into<String>,
        scope: VariableScope,
    ) -> Self {
        Self {
            variable: variable.into(),
            operator,
            value: 0.0,
            compare_variable: Some(compare_variable.into()),
            scope,
        }
    }
}
