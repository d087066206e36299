//! Connection settings for a Jira Cloud site.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{read_toml, validate_url, ConfigError, Result};

/// Gateway root for OAuth 2.0 (3LO) apps; the cloud id follows it.
pub const DEFAULT_API_ROOT: &str = "https://api.atlassian.com/ex/jira";

/// Host of the Atlassian identity API.
pub const DEFAULT_IDENTITY_URL: &str = "https://api.atlassian.com";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which version of the core REST API to target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApiVersion {
    /// `rest/api/2`: plain-text rich fields.
    #[serde(rename = "2")]
    V2,
    /// `rest/api/3`: Atlassian Document Format rich fields.
    #[serde(rename = "3")]
    #[default]
    V3,
}

impl ApiVersion {
    /// The path segment for this version.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V2 => "2",
            ApiVersion::V3 => "3",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to talk to one Jira Cloud site.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// The site's cloud id (from `accessible-resources`).
    pub cloud_id: String,

    /// The OAuth access token sent as a bearer token.
    pub access_token: String,

    /// Core REST API version.
    #[serde(default)]
    pub api_version: ApiVersion,

    /// Root under which `{cloud_id}/rest/...` lives.
    #[serde(default = "default_api_root")]
    pub api_root: String,

    /// Base URL of the identity API.
    #[serde(default = "default_identity_url")]
    pub identity_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_root() -> String {
    DEFAULT_API_ROOT.to_string()
}

fn default_identity_url() -> String {
    DEFAULT_IDENTITY_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ClientConfig {
    /// Create a configuration with Atlassian defaults.
    pub fn new(cloud_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            cloud_id: cloud_id.into(),
            access_token: access_token.into(),
            api_version: ApiVersion::default(),
            api_root: default_api_root(),
            identity_url: default_identity_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Select the core API version.
    pub fn with_api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = version;
        self
    }

    /// Point the client at a different gateway, e.g. a mock server.
    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = api_root.into();
        self
    }

    /// Point the identity endpoint at a different host.
    pub fn with_identity_url(mut self, identity_url: impl Into<String>) -> Self {
        self.identity_url = identity_url.into();
        self
    }

    /// Parse a configuration from TOML.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        read_toml(path.as_ref())
    }

    /// Validate this configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` if the cloud id or token is
    /// empty, a URL is not http(s), or the timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if self.cloud_id.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "cloud_id cannot be empty".to_string(),
            ));
        }

        if self.cloud_id.contains(char::is_whitespace) || self.cloud_id.contains('/') {
            return Err(ConfigError::ValidationError(format!(
                "cloud_id '{}' cannot contain whitespace or '/'",
                self.cloud_id
            )));
        }

        if self.access_token.is_empty() {
            return Err(ConfigError::ValidationError(
                "access_token cannot be empty".to_string(),
            ));
        }

        validate_url("api_root", &self.api_root)?;
        validate_url("identity_url", &self.identity_url)?;

        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// The request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn site_root(&self) -> String {
        format!("{}/{}", self.api_root.trim_end_matches('/'), self.cloud_id)
    }

    /// Base URL of the core REST API.
    pub fn core_base_url(&self) -> String {
        format!("{}/rest/api/{}", self.site_root(), self.api_version)
    }

    /// Base URL of the agile (board) API.
    pub fn agile_base_url(&self) -> String {
        format!("{}/rest/agile/1.0", self.site_root())
    }

    /// Base URL of the identity API.
    pub fn identity_base_url(&self) -> String {
        self.identity_url.trim_end_matches('/').to_string()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("cloud_id", &self.cloud_id)
            .field("access_token", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("api_root", &self.api_root)
            .field("identity_url", &self.identity_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
