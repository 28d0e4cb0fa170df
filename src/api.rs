//! HTTP surface: `/evaluate` and `/health`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::error::EvalError;
use crate::pipeline::EvaluationOrchestrator;
use crate::schema::EvaluationRequest;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<EvaluationOrchestrator>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/evaluate", post(evaluate))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn evaluate(
    State(state): State<AppState>,
    Json(request): Json<EvaluationRequest>,
) -> Response {
    match state.orchestrator.evaluate(&request).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(EvalError::Validation(err)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "detail": err.to_string() })),
        )
            .into_response(),
        Err(err) => {
            // Unrecovered pipeline failure: log the cause, return a generic
            // message so internals never leak to the caller.
            error!(error = %err, "evaluation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": "An internal error occurred." })),
            )
                .into_response()
        }
    }
}
