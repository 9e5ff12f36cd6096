// Google credential discovery and access-token management
// Author: kelexine (https://github.com/kelexine)

mod provider;

pub use provider::TokenProvider;

use serde::Deserialize;
use zeroize::Zeroize;

/// Seconds before expiry at which a cached token is treated as stale.
pub const REFRESH_BUFFER_SECONDS: i64 = 300;

/// `authorized_user` credentials as written by
/// `gcloud auth application-default login`.
#[derive(Clone, Deserialize, Zeroize)]
#[zeroize(drop)]
pub struct AuthorizedUserCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    #[serde(rename = "type", default)]
    pub credential_type: String,
    #[serde(default)]
    pub quota_project_id: Option<String>,
}

// Custom Debug impl that never logs secrets
impl std::fmt::Debug for AuthorizedUserCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizedUserCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("type", &self.credential_type)
            .field("quota_project_id", &self.quota_project_id)
            .finish()
    }
}

/// A bearer token together with its absolute expiry (unix millis).
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct AccessToken {
    pub access_token: String,
    pub expiry_date: i64,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"[REDACTED]")
            .field("expiry_date", &self.expiry_date)
            .finish()
    }
}

impl AccessToken {
    /// Build from an OAuth2 `expires_in` (seconds from now).
    pub fn expiring_in(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            expiry_date: chrono::Utc::now().timestamp_millis() + expires_in * 1000,
        }
    }

    /// Check if token is expired or will expire within buffer seconds
    pub fn is_expired(&self, buffer_seconds: i64) -> bool {
        let now = chrono::Utc::now().timestamp_millis();
        self.expiry_date - now < buffer_seconds * 1000
    }
}

/// Body returned by both the OAuth2 token endpoint and the metadata server.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    3600
}
