// Inbound /llm API bodies
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};

/// Usage hint served on `GET /llm`.
pub const USAGE_MESSAGE: &str = "Use POST with JSON { prompt: 'your text' }";

/// JSON body produced for every `/llm` exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutcomePayload {
    Answer { answer: String },
    Error { error: String },
    Message { message: String },
}

impl OutcomePayload {
    pub fn answer(&self) -> Option<&str> {
        match self {
            OutcomePayload::Answer { answer } => Some(answer),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            OutcomePayload::Error { error } => Some(error),
            _ => None,
        }
    }
}

/// Service details served on `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub project_id: String,
    pub location: String,
    pub text_model: String,
    pub timestamp: String,
}
