// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::error::{LlmError, MISSING_PROMPT_MESSAGE};
use crate::handler::Outcome;
use crate::models::api::HealthResponse;
use crate::vertex::TEXT_MODEL;
use crate::SERVICE_NAME;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use std::time::Instant;
use tracing::warn;

/// `GET /llm`: usage hint
pub async fn llm_describe_handler(State(state): State<AppState>) -> Outcome {
    let started = Instant::now();
    let outcome = state.handler.describe();
    crate::metrics::record_request(
        "GET",
        outcome.status.as_u16(),
        started.elapsed().as_secs_f64(),
    );
    outcome
}

/// `POST /llm`: run the prompt pipeline
pub async fn llm_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Outcome {
    let started = Instant::now();

    let outcome = match body {
        Ok(body) => state.handler.handle(&body).await,
        Err(rejection) => {
            // Unreadable (e.g. oversized) bodies are treated like any unparseable body.
            warn!("Failed to read request body: {}", rejection);
            Outcome::from_error(&LlmError::InvalidRequest(MISSING_PROMPT_MESSAGE.to_string()))
        }
    };

    crate::metrics::record_request(
        "POST",
        outcome.status.as_u16(),
        started.elapsed().as_secs_f64(),
    );
    outcome
}

/// `GET /health`: service identity and upstream target
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
        project_id: state.config.vertex.project_id.clone(),
        location: state.config.vertex.location.clone(),
        text_model: TEXT_MODEL.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// `GET /metrics`: Prometheus exposition
pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        crate::metrics::gather_metrics(),
    )
}
