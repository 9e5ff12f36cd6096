// Vertex AI REST client
// Author: kelexine (https://github.com/kelexine)

use super::{GenerationClient, TEXT_MODEL};
use crate::auth::TokenProvider;
use crate::config::VertexConfig;
use crate::error::{LlmError, Result};
use crate::models::vertex::{GenerateContentRequest, GenerateContentResponse, GenerateContentResult};
use crate::utils::logging::sanitize;
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Client for the Vertex AI `generateContent` endpoint.
///
/// Bound to one project, region and model at construction; every call
/// authenticates with a bearer token from the [`TokenProvider`].
pub struct VertexClient {
    http_client: Client,
    config: VertexConfig,
    token_provider: TokenProvider,
    model: String,
}

impl VertexClient {
    /// Create a Vertex AI client for the configured project and region.
    pub fn new(config: &VertexConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .use_rustls_tls()
            .build()
            .map_err(|e| LlmError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let token_provider = TokenProvider::from_config(config, http_client.clone())?;

        Ok(Self {
            http_client,
            config: config.clone(),
            token_provider,
            model: TEXT_MODEL.to_string(),
        })
    }

    /// Get the Google Cloud project ID
    pub fn project_id(&self) -> &str {
        &self.config.project_id
    }

    /// Get the Vertex AI region
    pub fn location(&self) -> &str {
        &self.config.location
    }

    /// Get the model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the credential source in use
    pub fn token_provider(&self) -> &TokenProvider {
        &self.token_provider
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:generateContent",
            self.config.endpoint(),
            self.config.project_id,
            self.config.location,
            self.model
        )
    }

    async fn call(&self, request: &GenerateContentRequest) -> Result<GenerateContentResult> {
        let url = self.generate_url();

        let access_token = self.token_provider.get_token().await?;

        let mut builder = self.http_client.post(&url).bearer_auth(access_token);
        if let Some(quota_project) = self.token_provider.quota_project_id() {
            builder = builder.header("x-goog-user-project", quota_project);
        }

        let response = builder
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::Upstream(format!("HTTP error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                "Vertex AI error: HTTP {} - Response body: {}",
                status,
                sanitize(&error_text)
            );
            // Keep the raw body: it carries the upstream status (e.g. PERMISSION_DENIED).
            return Err(LlmError::Upstream(format!("HTTP {}: {}", status, error_text)));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| LlmError::Upstream(format!("Failed to read response body: {}", e)))?;

        debug!(
            "Raw Vertex AI response (first 500 chars): {}",
            response_text.chars().take(500).collect::<String>()
        );

        Ok(GenerateContentResult {
            response: Self::parse_body(&response_text)?,
        })
    }

    /// An empty or `null` body is a successful call without a response object.
    fn parse_body(body: &str) -> Result<Option<GenerateContentResponse>> {
        let body = body.trim();
        if body.is_empty() {
            return Ok(None);
        }

        serde_json::from_str(body).map_err(|e| {
            error!("Failed to parse Vertex AI response: {}", e);
            LlmError::Upstream(format!("Response parsing error: {}", e))
        })
    }
}

#[async_trait]
impl GenerationClient for VertexClient {
    async fn generate(&self, request: &GenerateContentRequest) -> Result<GenerateContentResult> {
        info!(
            project_id = %self.config.project_id,
            location = %self.config.location,
            model = %self.model,
            "Calling Vertex AI generateContent"
        );

        let started = Instant::now();
        let result = self.call(request).await;
        let outcome = if result.is_ok() { "success" } else { "error" };
        crate::metrics::record_vertex_call(&self.model, outcome, started.elapsed().as_secs_f64());

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> VertexClient {
        let config = VertexConfig {
            project_id: "demo-project".to_string(),
            location: "asia-northeast1".to_string(),
            api_base_url: Some(base_url.to_string()),
            access_token: Some("ya29.test".to_string()),
            ..VertexConfig::default()
        };
        VertexClient::new(&config).unwrap()
    }

    #[test]
    fn test_generate_url_layout() {
        let client = test_client("https://example.test/");
        assert_eq!(
            client.generate_url(),
            "https://example.test/v1/projects/demo-project/locations/asia-northeast1/publishers/google/models/gemini-1.0-pro:generateContent"
        );
    }

    #[test]
    fn test_parse_body_null_and_empty() {
        assert!(VertexClient::parse_body("").unwrap().is_none());
        assert!(VertexClient::parse_body("  null ").unwrap().is_none());
        assert!(VertexClient::parse_body("{}").unwrap().is_some());
        assert!(VertexClient::parse_body("not json").is_err());
    }
}
