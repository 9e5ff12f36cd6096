// Vertex AI client module
// Author: kelexine (https://github.com/kelexine)

mod client;
mod request;

pub use client::VertexClient;
pub use request::{
    build_request, CANDIDATE_COUNT, MAX_OUTPUT_TOKENS, SYSTEM_INSTRUCTION, TEMPERATURE, TEXT_MODEL,
};

use crate::error::Result;
use crate::models::vertex::{GenerateContentRequest, GenerateContentResult};
use async_trait::async_trait;

/// The one upstream operation the request pipeline depends on.
///
/// Implemented by [`VertexClient`] in production and by scripted fakes in tests.
/// Failures must carry a human-readable message; the pipeline classifies them
/// by inspecting that message.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, request: &GenerateContentRequest) -> Result<GenerateContentResult>;
}
