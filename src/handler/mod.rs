//! The `/llm` request pipeline.
//!
//! `RequestHandler` takes the raw request body and always produces exactly one
//! [`Outcome`]: a status code plus an `{ answer }` or `{ error }` JSON payload.
//! It knows nothing about the web framework; `server::handlers` adapts it.
//!
//! Flow: extract prompt -> build request -> call upstream (auth failures become
//! 403, everything else an opaque 500) -> validate response shape -> join the
//! first candidate's text parts. Any error is mapped to a status in one place.

// Author: kelexine (https://github.com/kelexine)

use crate::error::{
    LlmError, Result, AUTH_FAILURE_MESSAGE, GENERATION_FAILED_MESSAGE, MISSING_PROMPT_MESSAGE,
};
use crate::models::api::{OutcomePayload, USAGE_MESSAGE};
use crate::models::vertex::{GenerateContentResponse, GenerateContentResult};
use crate::utils::logging::sanitize;
use crate::vertex::{build_request, GenerationClient};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Status and body produced for one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: StatusCode,
    pub payload: OutcomePayload,
}

impl Outcome {
    pub fn answer(answer: String) -> Self {
        Self {
            status: StatusCode::OK,
            payload: OutcomePayload::Answer { answer },
        }
    }

    pub fn usage() -> Self {
        Self {
            status: StatusCode::OK,
            payload: OutcomePayload::Message {
                message: USAGE_MESSAGE.to_string(),
            },
        }
    }

    pub fn from_error(err: &LlmError) -> Self {
        Self {
            status: err.status_code(),
            payload: OutcomePayload::Error {
                error: err.public_message(),
            },
        }
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        (self.status, axum::Json(self.payload)).into_response()
    }
}

/// Stateless prompt handler; cheap to clone and safe to share across requests.
#[derive(Clone)]
pub struct RequestHandler {
    client: Arc<dyn GenerationClient>,
}

impl RequestHandler {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self { client }
    }

    /// Run the full pipeline for a `POST` body.
    pub async fn handle(&self, raw_body: &[u8]) -> Outcome {
        info!("Incoming request to /llm");

        match self.process(raw_body).await {
            Ok(answer) => Outcome::answer(answer),
            Err(err) => {
                if err.status_code().is_client_error() {
                    warn!(status = err.status_code().as_u16(), error = %err, "Request rejected");
                } else {
                    error!(status = err.status_code().as_u16(), error = %err, "LLM error caught in handler");
                }
                Outcome::from_error(&err)
            }
        }
    }

    /// Usage hint for `GET`; never touches the upstream client.
    pub fn describe(&self) -> Outcome {
        Outcome::usage()
    }

    async fn process(&self, raw_body: &[u8]) -> Result<String> {
        let prompt = extract_prompt(raw_body)?;
        info!(prompt = %prompt, "Received prompt");

        let request = build_request(&prompt);

        let result = self
            .client
            .generate(&request)
            .await
            .map_err(classify_upstream_error)?;

        let answer = extract_answer(result)?;
        info!(answer = %answer, "Generated answer text");

        Ok(answer)
    }
}

/// Pull a non-empty string `prompt` out of a JSON body.
pub fn extract_prompt(raw_body: &[u8]) -> Result<String> {
    let missing = || LlmError::InvalidRequest(MISSING_PROMPT_MESSAGE.to_string());

    let body: serde_json::Value = serde_json::from_slice(raw_body).map_err(|e| {
        debug!("Request body is not valid JSON: {}", e);
        missing()
    })?;

    body.get("prompt")
        .and_then(serde_json::Value::as_str)
        .filter(|prompt| !prompt.is_empty())
        .map(str::to_string)
        .ok_or_else(missing)
}

/// Map a failed upstream call to the error the caller sees.
///
/// Only authentication/authorization failures are special-cased; the detail of
/// anything else stays in the logs.
pub fn classify_upstream_error(err: LlmError) -> LlmError {
    error!(error = %sanitize(&err.to_string()), "Error during generateContent API call");

    if err.is_auth_failure() {
        error!("Vertex AI authentication failed. Please check your GCP credentials or impersonation settings.");
        LlmError::UpstreamAuth(AUTH_FAILURE_MESSAGE.to_string())
    } else {
        LlmError::Generation(GENERATION_FAILED_MESSAGE.to_string())
    }
}

/// Validate the result shape and join the first candidate's text parts.
///
/// Only the first candidate is read. Parts without text contribute an empty
/// string, so they still add a separator.
pub fn extract_answer(result: GenerateContentResult) -> Result<String> {
    let response = result.response.ok_or_else(|| {
        LlmError::MalformedResponse("No response received from Vertex AI.".to_string())
    })?;

    log_response_signals(&response);

    let candidate = response
        .candidates
        .as_ref()
        .and_then(|candidates| candidates.first())
        .ok_or_else(|| {
            LlmError::MalformedResponse(
                "No candidate responses received from Vertex AI.".to_string(),
            )
        })?;

    let parts = candidate
        .content
        .as_ref()
        .map(|content| content.parts.as_slice())
        .filter(|parts| !parts.is_empty())
        .ok_or_else(|| {
            LlmError::MalformedResponse("Candidate response is missing content parts.".to_string())
        })?;

    Ok(parts
        .iter()
        .map(|part| part.text.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" "))
}

// Observations only; they never change the outcome.
fn log_response_signals(response: &GenerateContentResponse) {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.as_deref())
    {
        warn!(block_reason = reason, "Prompt feedback reported a block");
    }

    if let Some(reason) = response
        .candidates
        .as_ref()
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.finish_reason.as_deref())
        .filter(|reason| *reason != "STOP")
    {
        warn!(finish_reason = reason, "Candidate finished early");
    }

    if let Some(usage) = &response.usage_metadata {
        debug!(
            prompt_tokens = usage.prompt_token_count.unwrap_or(0),
            candidate_tokens = usage.candidates_token_count.unwrap_or(0),
            total_tokens = usage.total_token_count.unwrap_or(0),
            "Token usage"
        );
    }
}
