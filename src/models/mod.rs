//! Data models for the inbound endpoint and Vertex AI.
//!
//! This module contains the type definitions for request/response bodies used by:
//! - The inbound `/llm` JSON API (`api`)
//! - The upstream Vertex AI `generateContent` API (`vertex`)

// Author: kelexine (https://github.com/kelexine)

pub mod api;
pub mod vertex;

pub use api::{HealthResponse, OutcomePayload, USAGE_MESSAGE};
pub use vertex::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerateContentResult,
    GenerationConfig, HarmBlockThreshold, HarmCategory, Part, SafetySetting,
};
