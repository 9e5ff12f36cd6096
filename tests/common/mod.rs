// Shared test doubles
// Author: kelexine (https://github.com/kelexine)

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use vertex_llm::error::{LlmError, Result};
use vertex_llm::models::vertex::{GenerateContentRequest, GenerateContentResult};
use vertex_llm::vertex::GenerationClient;

/// What the fake upstream answers with.
#[derive(Clone)]
pub enum Reply {
    /// Successful call with this JSON response body (`None` = no response object).
    Body(Option<Value>),
    /// Failed call with this message.
    Fail(String),
}

/// `GenerationClient` that replays a fixed reply and records every call.
pub struct ScriptedClient {
    reply: Reply,
    calls: AtomicUsize,
    requests: Mutex<Vec<GenerateContentRequest>>,
}

impl ScriptedClient {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn answering(texts: &[&str]) -> Arc<Self> {
        Self::new(Reply::Body(Some(response_with_texts(texts))))
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Self::new(Reply::Fail(message.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<GenerateContentRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl GenerationClient for ScriptedClient {
    async fn generate(&self, request: &GenerateContentRequest) -> Result<GenerateContentResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        match &self.reply {
            Reply::Body(None) => Ok(GenerateContentResult { response: None }),
            Reply::Body(Some(body)) => Ok(GenerateContentResult {
                response: Some(serde_json::from_value(body.clone())?),
            }),
            Reply::Fail(message) => Err(LlmError::Upstream(message.clone())),
        }
    }
}

/// A Vertex AI response whose first candidate carries one part per text.
pub fn response_with_texts(texts: &[&str]) -> Value {
    let parts: Vec<Value> = texts.iter().map(|text| json!({ "text": text })).collect();
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": parts },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 4, "candidatesTokenCount": 2, "totalTokenCount": 6 }
    })
}
