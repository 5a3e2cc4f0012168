//! Evaluate pipeline: risk and clarity assessment of a client message.
//! The model is asked for one JSON object, extracted with `EmbeddedJson`.

pub mod models;
pub mod prompts;

use crate::errors::AppError;
use crate::extract::EmbeddedJson;
use crate::llm_client::prompts::{or_not_specified, render, NONE, NO_INVENTION_INSTRUCTION};
use crate::pipeline::Pipeline;

use models::{EvaluateRequest, EvaluationInput, EvaluationResult};
use prompts::EVALUATE_PROMPT_TEMPLATE;

pub struct EvaluatePipeline;

impl Pipeline for EvaluatePipeline {
    const NAME: &'static str = "evaluate";

    type Request = EvaluateRequest;
    type Input = EvaluationInput;
    type Output = EvaluationResult;
    type Parser = EmbeddedJson<EvaluationResult>;

    fn validate(request: EvaluateRequest) -> Result<EvaluationInput, AppError> {
        let (Some(project_title), Some(client_message), Some(role)) = (
            required(request.project_title),
            required(request.client_message),
            required(request.role),
        ) else {
            return Err(AppError::Validation("Missing required fields".to_string()));
        };

        Ok(EvaluationInput {
            project_title,
            client_message,
            role,
            red_flags: request
                .red_flags
                .unwrap_or_default()
                .into_iter()
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
                .collect(),
            scope: request.scope,
            deliverables: request.deliverables,
            price: request.price,
        })
    }

    fn build_prompt(input: &EvaluationInput) -> String {
        let red_flags = if input.red_flags.is_empty() {
            NONE.to_string()
        } else {
            input.red_flags.join(", ")
        };

        render(
            EVALUATE_PROMPT_TEMPLATE,
            &[
                ("guardrails", NO_INVENTION_INSTRUCTION),
                ("project_title", input.project_title.as_str()),
                ("client_message", input.client_message.as_str()),
                ("role", input.role.as_str()),
                ("red_flags", red_flags.as_str()),
                ("scope", or_not_specified(input.scope.as_deref())),
                ("deliverables", or_not_specified(input.deliverables.as_deref())),
                ("price", or_not_specified(input.price.as_deref())),
            ],
        )
    }

    fn parser() -> EmbeddedJson<EvaluationResult> {
        EmbeddedJson::new()
    }
}

/// Present and not blank.
fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
