pub mod json_api;

pub use json_api::{
    complete_match_json, preview_rules_json, reconcile_match_json, validate_rules_json,
    CompletionRequest, CompletionResponse, PreviewRequest, PreviewResponse, ReconcileRequest,
    ReconcileResponse, ValidateRulesRequest, ValidateRulesResponse,
};
