// Error types for the vertex-llm gateway
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Message returned when the request body carries no usable prompt.
pub const MISSING_PROMPT_MESSAGE: &str = "Missing `prompt` in request body.";

/// Message returned when Vertex AI rejects our credentials or IAM bindings.
pub const AUTH_FAILURE_MESSAGE: &str =
    "Vertex AI authentication failed. Run `gcloud auth application-default login` or check IAM permissions.";

/// Opaque message for every other upstream failure.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate content from Vertex AI.";

/// Fallback when an error renders to an empty string.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Substrings in an upstream error that indicate an authentication or
/// authorization problem rather than a generic failure.
pub const AUTH_ERROR_MARKERS: [&str; 3] = [
    "PERMISSION_DENIED",
    "Unable to authenticate your request",
    "unable to impersonate",
];

#[derive(Error, Debug)]
pub enum LlmError {
    /// Caller sent an unusable body (400).
    #[error("{0}")]
    InvalidRequest(String),

    /// Upstream refused our identity (403).
    #[error("{0}")]
    UpstreamAuth(String),

    /// Upstream failed for any other reason; detail stays in the logs (500).
    #[error("{0}")]
    Generation(String),

    /// Upstream answered but the payload is unusable (500).
    #[error("{0}")]
    MalformedResponse(String),

    /// Raw upstream failure before classification.
    #[error("{0}")]
    Upstream(String),

    #[error("Unable to authenticate your request: {0}")]
    Credentials(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("{0}")]
    Internal(String),
}

impl LlmError {
    /// HTTP status this error is surfaced with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            LlmError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            LlmError::UpstreamAuth(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True when the rendered message carries one of [`AUTH_ERROR_MARKERS`].
    pub fn is_auth_failure(&self) -> bool {
        let message = self.to_string();
        AUTH_ERROR_MARKERS
            .iter()
            .any(|marker| message.contains(marker))
    }

    /// Message placed in the `error` field of the response body.
    pub fn public_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

// Convert LlmError to HTTP responses for Axum
impl IntoResponse for LlmError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({ "error": self.public_message() });
        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, LlmError>;
