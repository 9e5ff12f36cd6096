//! Google OAuth2 access-token provider.
//!
//! `TokenProvider` follows the Application Default Credentials lookup order
//! that the Google client libraries use, minus service-account key signing:
//!
//! 1. an explicit access token from configuration,
//! 2. an `authorized_user` JSON file (`GOOGLE_APPLICATION_CREDENTIALS` or the
//!    gcloud well-known location), refreshed against the OAuth2 token endpoint,
//! 3. the GCE / Cloud Run metadata server.
//!
//! Fetched tokens are cached and refreshed with double-checked locking so a burst
//! of concurrent requests triggers a single refresh.

// Author: kelexine (https://github.com/kelexine)

use super::{AccessToken, AuthorizedUserCredentials, TokenResponse, REFRESH_BUFFER_SECONDS};
use crate::config::VertexConfig;
use crate::error::{LlmError, Result};
use reqwest::Client;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

enum TokenSource {
    Static(AccessToken),
    AuthorizedUser {
        credentials: AuthorizedUserCredentials,
        token_uri: String,
    },
    MetadataServer {
        base_url: String,
    },
}

impl TokenSource {
    fn describe(&self) -> &'static str {
        match self {
            TokenSource::Static(_) => "static access token",
            TokenSource::AuthorizedUser { .. } => "authorized_user credentials",
            TokenSource::MetadataServer { .. } => "metadata server",
        }
    }
}

/// Supplies bearer tokens for Vertex AI calls.
#[derive(Clone)]
pub struct TokenProvider {
    source: Arc<TokenSource>,
    /// Last token handed out by the source.
    cached: Arc<RwLock<Option<AccessToken>>>,
    /// Serializes refresh attempts.
    refresh_lock: Arc<Mutex<()>>,
    http_client: Client,
}

// Custom Debug impl that never logs tokens or refresh credentials
impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("source", &self.source_name())
            .finish_non_exhaustive()
    }
}

impl TokenProvider {
    /// Resolves the credential source from configuration.
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Credentials` if an explicitly configured credentials
    /// file is missing, malformed, or of an unsupported type.
    pub fn from_config(config: &VertexConfig, http_client: Client) -> Result<Self> {
        let source = if let Some(token) = config.access_token.as_ref().filter(|t| !t.is_empty()) {
            // Lifetime unknown; treat as valid until the process exits.
            TokenSource::Static(AccessToken {
                access_token: token.clone(),
                expiry_date: i64::MAX,
            })
        } else if let Some(path) = config.credentials_path.as_deref() {
            TokenSource::AuthorizedUser {
                credentials: Self::load_credentials(Path::new(path))?,
                token_uri: config.token_uri.clone(),
            }
        } else if let Some(path) = Self::well_known_path(config).filter(|p| p.exists()) {
            TokenSource::AuthorizedUser {
                credentials: Self::load_credentials(&path)?,
                token_uri: config.token_uri.clone(),
            }
        } else {
            TokenSource::MetadataServer {
                base_url: config.metadata_url.trim_end_matches('/').to_string(),
            }
        };

        info!("Using {} for Vertex AI authentication", source.describe());

        Ok(Self {
            source: Arc::new(source),
            cached: Arc::new(RwLock::new(None)),
            refresh_lock: Arc::new(Mutex::new(())),
            http_client,
        })
    }

    /// gcloud's Application Default Credentials location, unless `adc_path` moves it.
    fn well_known_path(config: &VertexConfig) -> Option<PathBuf> {
        if let Some(path) = config.adc_path.as_deref() {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("gcloud").join("application_default_credentials.json"))
    }

    /// Reads an ADC file and checks it is a type we can refresh.
    fn load_credentials(path: &Path) -> Result<AuthorizedUserCredentials> {
        if !path.exists() {
            return Err(LlmError::Credentials(format!(
                "credentials file not found: {}",
                path.display()
            )));
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            LlmError::Credentials(format!("failed to read {}: {}", path.display(), e))
        })?;

        let credentials: AuthorizedUserCredentials = serde_json::from_str(&contents)
            .map_err(|e| LlmError::Credentials(format!("invalid credentials JSON: {}", e)))?;

        if credentials.credential_type != "authorized_user" {
            return Err(LlmError::Credentials(format!(
                "unsupported credential type '{}'; run `gcloud auth application-default login` \
                 or rely on the metadata server",
                credentials.credential_type
            )));
        }

        debug!("Loaded authorized_user credentials from {}", path.display());
        Ok(credentials)
    }

    /// Human-readable name of the active credential source.
    pub fn source_name(&self) -> &'static str {
        self.source.describe()
    }

    /// Project billed for quota, when the user credentials name one.
    pub fn quota_project_id(&self) -> Option<&str> {
        match self.source.as_ref() {
            TokenSource::AuthorizedUser { credentials, .. } => {
                credentials.quota_project_id.as_deref().filter(|p| !p.is_empty())
            }
            _ => None,
        }
    }

    /// Returns a valid access token, refreshing it when stale.
    ///
    /// 1. Fast path under the shared read lock.
    /// 2. On expiry, take the refresh mutex.
    /// 3. Re-check; another request may have refreshed already.
    /// 4. Fetch and cache.
    pub async fn get_token(&self) -> Result<String> {
        if let TokenSource::Static(token) = self.source.as_ref() {
            return Ok(token.access_token.clone());
        }

        if let Some(token) = self.fresh_cached().await {
            return Ok(token);
        }

        let _guard = self.refresh_lock.lock().await;

        if let Some(token) = self.fresh_cached().await {
            debug!("Token already refreshed by another concurrent request.");
            return Ok(token);
        }

        let fresh = self.fetch_token().await?;
        let access_token = fresh.access_token.clone();
        *self.cached.write().await = Some(fresh);

        Ok(access_token)
    }

    async fn fresh_cached(&self) -> Option<String> {
        let cached = self.cached.read().await;
        cached
            .as_ref()
            .filter(|token| !token.is_expired(REFRESH_BUFFER_SECONDS))
            .map(|token| token.access_token.clone())
    }

    async fn fetch_token(&self) -> Result<AccessToken> {
        let response = match self.source.as_ref() {
            TokenSource::Static(token) => return Ok(token.clone()),
            TokenSource::AuthorizedUser {
                credentials,
                token_uri,
            } => {
                debug!("Refreshing user access token via {}", token_uri);
                let params = [
                    ("client_id", credentials.client_id.as_str()),
                    ("client_secret", credentials.client_secret.as_str()),
                    ("refresh_token", credentials.refresh_token.as_str()),
                    ("grant_type", "refresh_token"),
                ];
                self.http_client
                    .post(token_uri)
                    .form(&params)
                    .send()
                    .await
                    .map_err(|e| LlmError::Credentials(format!("token endpoint unreachable: {}", e)))?
            }
            TokenSource::MetadataServer { base_url } => {
                let url = format!(
                    "{}/computeMetadata/v1/instance/service-accounts/default/token",
                    base_url
                );
                debug!("Requesting access token from {}", url);
                self.http_client
                    .get(&url)
                    .header("Metadata-Flavor", "Google")
                    .send()
                    .await
                    .map_err(|e| {
                        LlmError::Credentials(format!(
                            "no credentials file and metadata server unreachable: {}",
                            e
                        ))
                    })?
            }
        };

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Access token request rejected: HTTP {}", status);
            return Err(LlmError::Credentials(format!(
                "token request failed with HTTP {}: {}",
                status,
                crate::utils::logging::sanitize(&error_text)
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Credentials(format!("malformed token response: {}", e)))?;

        debug!("Obtained access token expiring in {} seconds", body.expires_in);
        Ok(AccessToken::expiring_in(body.access_token, body.expires_in))
    }
}
