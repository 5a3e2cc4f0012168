//! Response extraction — turns raw model text into a caller-facing result.
//!
//! Each pipeline picks a `ResponseParser` strategy. Callers only see the
//! trait, so a strategy can be replaced (e.g. a structured-output mode for the
//! scope pipeline) without touching handlers.

use thiserror::Error;

pub mod embedded_json;
pub mod sections;

pub use embedded_json::EmbeddedJson;
pub use sections::SectionedScope;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("No JSON found in AI response")]
    NoJsonFound { raw: String },

    #[error("AI response could not be parsed: {reason}")]
    UnparsableModelOutput { reason: String, raw: String },
}

/// A strategy for converting raw model output into `Output`.
pub trait ResponseParser: Send + Sync {
    type Output;

    fn parse(&self, raw: &str) -> Result<Self::Output, ExtractError>;
}
