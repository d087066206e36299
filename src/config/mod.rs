//! Client configuration.
//!
//! Configuration is plain serde data: it can be built in code or loaded from
//! a TOML file, and is checked with `validate()` before a client is built.

mod client;
mod oauth;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

pub use client::{
    ApiVersion, ClientConfig, DEFAULT_API_ROOT, DEFAULT_IDENTITY_URL, DEFAULT_TIMEOUT_SECS,
};
pub use oauth::{OAuthConfig, DEFAULT_TOKEN_URL};

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        /// The file that was read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or has the wrong shape.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A value failed validation.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&contents)?)
}

fn validate_url(field: &str, url: &str) -> Result<()> {
    if url.is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "{} cannot be empty",
            field
        )));
    }
    if !url.starts_with("https://") && !url.starts_with("http://") {
        return Err(ConfigError::ValidationError(format!(
            "{} must start with http:// or https://",
            field
        )));
    }
    Ok(())
}
