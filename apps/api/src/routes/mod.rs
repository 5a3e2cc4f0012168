pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::evaluate::EvaluatePipeline;
use crate::pipeline::handle;
use crate::scope::ScopePipeline;
use crate::state::AppState;

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/evaluate",
            post(handle::<EvaluatePipeline>).fallback(method_not_allowed),
        )
        .route(
            "/api/generate",
            post(handle::<ScopePipeline>).fallback(method_not_allowed),
        )
        .with_state(state)
}
