//! OAuth 2.0 app credentials used for token rotation.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{read_toml, validate_url, ConfigError, Result};

/// Atlassian's token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://auth.atlassian.com/oauth/token";

/// Credentials of the OAuth app that issued the tokens.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OAuthConfig {
    /// The app's client id.
    pub client_id: String,
    /// The app's client secret.
    pub client_secret: String,
    /// Token endpoint URL.
    #[serde(default = "default_token_url")]
    pub token_url: String,
}

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_string()
}

impl OAuthConfig {
    /// Create credentials for the default Atlassian token endpoint.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url: default_token_url(),
        }
    }

    /// Use a different token endpoint.
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Parse credentials from TOML.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load credentials from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        read_toml(path.as_ref())
    }

    /// Check that the id and secret are present and the URL is usable.
    pub fn validate(&self) -> Result<()> {
        if self.client_id.is_empty() {
            return Err(ConfigError::ValidationError(
                "client_id cannot be empty".to_string(),
            ));
        }
        if self.client_secret.is_empty() {
            return Err(ConfigError::ValidationError(
                "client_secret cannot be empty".to_string(),
            ));
        }
        validate_url("token_url", &self.token_url)
    }
}

impl fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("token_url", &self.token_url)
            .finish()
    }
}
