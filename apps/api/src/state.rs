use std::sync::Arc;

use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup; nothing in it changes afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Completion client. `GeminiClient` in production, a stub in tests.
    pub llm: Arc<dyn CompletionClient>,
}

impl AppState {
    pub fn new(llm: Arc<dyn CompletionClient>) -> Self {
        Self { llm }
    }
}
