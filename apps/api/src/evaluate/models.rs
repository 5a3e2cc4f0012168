use serde::{Deserialize, Serialize};

/// Request body for `POST /api/evaluate`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    pub project_title: Option<String>,
    pub client_message: Option<String>,
    pub role: Option<String>,
    /// Absent and `null` both mean no flags were selected.
    pub red_flags: Option<Vec<String>>,
    pub scope: Option<String>,
    pub deliverables: Option<String>,
    pub price: Option<String>,
}

/// Validated evaluate input. Optional fields stay `None` here; the prompt
/// builder decides how to render them.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationInput {
    pub project_title: String,
    pub client_message: String,
    pub role: String,
    pub red_flags: Vec<String>,
    pub scope: Option<String>,
    pub deliverables: Option<String>,
    pub price: Option<String>,
}

/// Overall risk label. Deserialization tolerates case, spacing and hyphen
/// drift; anything else is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Risk {
    Proceed,
    Caution,
    #[serde(rename = "High Risk")]
    HighRisk,
}

impl TryFrom<String> for Risk {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "proceed" => Ok(Risk::Proceed),
            "caution" => Ok(Risk::Caution),
            "highrisk" => Ok(Risk::HighRisk),
            _ => Err(format!(
                "unrecognized risk label '{value}' (expected Proceed, Caution or High Risk)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub project: String,
    pub role: String,
    pub risk: Risk,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub verdict: String,
    #[serde(default)]
    pub key_points_to_clarify: Vec<String>,
    #[serde(default)]
    pub potential_issues: Vec<String>,
    pub response_strategy: String,
}

/// Project assessment returned to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub summary: EvaluationSummary,
    pub recommendation: Recommendation,
}
