//! Generate pipeline: messy project description → deliverables, exclusions
//! and a client summary, split out of plain-text model output.

pub mod models;
pub mod prompts;

use crate::errors::AppError;
use crate::extract::sections::{DELIVERABLES_HEADER, EXCLUSIONS_HEADER, SUMMARY_HEADER};
use crate::extract::SectionedScope;
use crate::llm_client::prompts::{render, NO_INVENTION_INSTRUCTION};
use crate::pipeline::Pipeline;

use models::{GenerateRequest, ScopeInput, ScopeResult};
use prompts::{SCOPE_PROMPT_TEMPLATE, SCOPE_SYSTEM};

pub struct ScopePipeline;

impl Pipeline for ScopePipeline {
    const NAME: &'static str = "generate";

    type Request = GenerateRequest;
    type Input = ScopeInput;
    type Output = ScopeResult;
    type Parser = SectionedScope;

    fn validate(request: GenerateRequest) -> Result<ScopeInput, AppError> {
        match (request.text, request.price) {
            (Some(text), Some(price)) if !text.trim().is_empty() && !price.trim().is_empty() => {
                Ok(ScopeInput { text, price })
            }
            _ => Err(AppError::Validation(
                "Missing input: project description and price are required".to_string(),
            )),
        }
    }

    fn build_prompt(input: &ScopeInput) -> String {
        render(
            SCOPE_PROMPT_TEMPLATE,
            &[
                ("guardrails", NO_INVENTION_INSTRUCTION),
                ("deliverables_header", DELIVERABLES_HEADER),
                ("exclusions_header", EXCLUSIONS_HEADER),
                ("summary_header", SUMMARY_HEADER),
                ("text", input.text.trim()),
                ("price", input.price.trim()),
            ],
        )
    }

    fn system_instruction() -> Option<&'static str> {
        Some(SCOPE_SYSTEM)
    }

    fn parser() -> SectionedScope {
        SectionedScope
    }
}
