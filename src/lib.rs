// vertex-llm - JSON prompt endpoint backed by Vertex AI Gemini
// Author: kelexine (https://github.com/kelexine)

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod metrics;
pub mod models;
pub mod server;
pub mod utils;
pub mod vertex;

/// Name attached to every log span.
pub const SERVICE_NAME: &str = "vertex-llm";
