//! Axum-based HTTP server for the vertex-llm gateway.
//!
//! # Components
//!
//! - `handlers`: Thin adapters from axum extractors to the `/llm` pipeline,
//!   plus health and metrics endpoints.
//! - `middleware`: Request ID tracking and per-request tracing spans.
//! - `routes`: The main router configuration that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use routes::{create_router, AppState};
