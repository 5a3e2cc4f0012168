//! One request/response pipeline, parameterized per route:
//! validate → build prompt → one completion call → parse.
//!
//! Routes differ only in their `Pipeline` impl. Nothing is kept between
//! requests; the completion client is the only shared handle.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::ResponseParser;
use crate::llm_client::{CompletionClient, CompletionRequest};
use crate::state::AppState;

pub trait Pipeline: Send + Sync + 'static {
    /// Short name used in logs.
    const NAME: &'static str;

    type Request: DeserializeOwned + Send + 'static;
    type Input: Send;
    type Output: Serialize + Send;
    type Parser: ResponseParser<Output = Self::Output>;

    /// Checks required fields. Must not touch the network.
    fn validate(request: Self::Request) -> Result<Self::Input, AppError>;

    /// Pure: identical input renders a byte-identical prompt.
    fn build_prompt(input: &Self::Input) -> String;

    fn system_instruction() -> Option<&'static str> {
        None
    }

    fn parser() -> Self::Parser;
}

/// Runs one request through `P`. Validation failures return before the
/// completion client is called.
pub async fn run_pipeline<P: Pipeline>(
    client: &dyn CompletionClient,
    request: P::Request,
) -> Result<P::Output, AppError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("pipeline", pipeline = P::NAME, %request_id);

    async move {
        let input = P::validate(request).map_err(|e| {
            warn!("Rejected request: {e}");
            e
        })?;

        let prompt = P::build_prompt(&input);
        let mut completion = CompletionRequest::new(&prompt);
        if let Some(system) = P::system_instruction() {
            completion = completion.with_system(system);
        }

        let raw = client.complete(completion).await?;
        debug!("Raw model text: {raw}");

        let output = P::parser().parse(&raw)?;
        info!("Pipeline completed");
        Ok::<_, AppError>(output)
    }
    .instrument(span)
    .await
}

/// Generic POST handler. Malformed bodies are reported as validation errors
/// so every response is JSON.
pub async fn handle<P: Pipeline>(
    State(state): State<AppState>,
    payload: Result<Json<P::Request>, JsonRejection>,
) -> Result<Json<P::Output>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let output = run_pipeline::<P>(state.llm.as_ref(), request).await?;
    Ok(Json(output))
}
