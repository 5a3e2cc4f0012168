use serde::{Deserialize, Serialize};

/// Request body for `POST /api/generate`. Fields are optional at the wire
/// level so that absence is reported by the validator, not by serde.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    pub text: Option<String>,
    pub price: Option<String>,
}

/// Validated generate input.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeInput {
    pub text: String,
    pub price: String,
}

/// Structured project scope returned to the UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeResult {
    pub deliverables: Vec<String>,
    pub exclusions: Vec<String>,
    pub summary: String,
}
