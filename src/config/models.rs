//! Configuration data structures for the vertex-llm gateway.
//!
//! This module defines the schema for the application settings: the HTTP
//! listener, the upstream Vertex AI project, and logging output.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port, body limit).
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream Vertex AI settings.
    #[serde(default)]
    pub vertex: VertexConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `0.0.0.0`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8080`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest accepted request body in bytes.
    /// Default: `1048576` (1 MiB)
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

/// Settings for the upstream Vertex AI connection.
#[derive(Clone, Serialize, Deserialize)]
pub struct VertexConfig {
    /// Google Cloud project that owns the Vertex AI quota.
    /// Default: `welcome-study-project` (overridden by `PROJECT_ID`)
    #[serde(default = "default_project_id")]
    pub project_id: String,

    /// Region the model is served from.
    /// Default: `us-central1` (overridden by `LOCATION`)
    #[serde(default = "default_location")]
    pub location: String,

    /// Override for the regional endpoint, mostly for tests.
    /// Default: `https://{location}-aiplatform.googleapis.com`
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Request timeout in seconds for `generateContent`.
    /// Default: `120`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Path to an `authorized_user` credentials file.
    /// Default: `GOOGLE_APPLICATION_CREDENTIALS`, then the gcloud ADC location.
    #[serde(default)]
    pub credentials_path: Option<String>,

    /// Where to look for gcloud ADC when `credentials_path` is unset; a missing
    /// file falls through to the metadata server.
    /// Default: `~/.config/gcloud/application_default_credentials.json`
    #[serde(default)]
    pub adc_path: Option<String>,

    /// Pre-minted access token; skips ADC discovery when set.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Google OAuth2 token endpoint used to refresh user credentials.
    #[serde(default = "default_token_uri")]
    pub token_uri: String,

    /// Base URL of the GCE/Cloud Run metadata server.
    #[serde(default = "default_metadata_url")]
    pub metadata_url: String,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`).
    /// Default: `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl VertexConfig {
    /// Regional REST endpoint, honouring `api_base_url` when configured.
    pub fn endpoint(&self) -> String {
        match &self.api_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}-aiplatform.googleapis.com", self.location),
        }
    }
}

// Custom Debug impl that never logs tokens
impl std::fmt::Debug for VertexConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VertexConfig")
            .field("project_id", &self.project_id)
            .field("location", &self.location)
            .field("api_base_url", &self.api_base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("credentials_path", &self.credentials_path)
            .field("adc_path", &self.adc_path)
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("token_uri", &self.token_uri)
            .field("metadata_url", &self.metadata_url)
            .finish()
    }
}

// Default trait implementations linking to custom logic

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

impl Default for VertexConfig {
    fn default() -> Self {
        Self {
            project_id: default_project_id(),
            location: default_location(),
            api_base_url: None,
            timeout_seconds: default_timeout(),
            credentials_path: None,
            adc_path: None,
            access_token: None,
            token_uri: default_token_uri(),
            metadata_url: default_metadata_url(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Helper functions for serde defaults
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_body_limit() -> usize {
    1024 * 1024
}

fn default_project_id() -> String {
    "welcome-study-project".to_string()
}

fn default_location() -> String {
    "us-central1".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_metadata_url() -> String {
    "http://metadata.google.internal".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}
