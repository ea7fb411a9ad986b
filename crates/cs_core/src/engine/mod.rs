pub mod condition;
pub mod rule;
pub mod target;
pub mod variables;

pub use condition::ConditionEvaluator;
pub use rule::RuleEvaluator;
pub use target::resolve_targets;
pub use variables::VariableRegistry;
