// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{health_handler, llm_describe_handler, llm_handler, metrics_handler};
use super::middleware::{request_id_layers, trace_layer};
use crate::config::AppConfig;
use crate::handler::RequestHandler;
use crate::vertex::GenerationClient;
use axum::extract::DefaultBodyLimit;
use axum::{routing::get, Router};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub handler: RequestHandler,
}

pub fn create_router(config: AppConfig, client: Arc<dyn GenerationClient>) -> Router {
    let body_limit = config.server.body_limit_bytes;
    let state = AppState {
        config,
        handler: RequestHandler::new(client),
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    Router::new()
        .route("/llm", get(llm_describe_handler).post(llm_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(trace_layer())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state)
}
