//! API error types for the Jira client.
//!
//! Every failure the client can produce is an [`ApiError`]. Failed HTTP calls,
//! whether the server answered with an error status or the request never got a
//! response, are normalized into a single [`RemoteError`] carrying the status,
//! status text, raw payload and the underlying transport error.

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::ConfigError;

/// Message used when neither the server nor the transport said anything useful.
const FALLBACK_MESSAGE: &str = "Unknown error";

/// Errors that can occur when interacting with the Jira APIs.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field was absent from a request payload.
    ///
    /// Raised before any network call is made.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The remote service rejected the request or could not be reached.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// The token endpoint answered without one of the expected tokens.
    #[error("Token response is missing {0}")]
    MissingToken(&'static str),

    /// A successful response body did not match the expected shape.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// A configured base URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The client configuration is invalid.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built or a request could not be assembled.
    #[error("HTTP client error: {0}")]
    Http(#[source] reqwest::Error),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// The HTTP status of a remote failure, if the server responded at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Remote(remote) => remote.status,
            _ => None,
        }
    }

    /// The underlying remote error, if this is one.
    pub fn as_remote(&self) -> Option<&RemoteError> {
        match self {
            ApiError::Remote(remote) => Some(remote),
            _ => None,
        }
    }

    /// 401 from the server: the bearer token is invalid or expired.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// 403 from the server.
    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(StatusCode::FORBIDDEN)
    }

    /// 404 from the server.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// 429 from the server.
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(StatusCode::TOO_MANY_REQUESTS)
    }

    /// Any 5xx from the server.
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| s.is_server_error())
    }
}

/// A failed remote call, normalized.
///
/// Built exactly once per failed dispatch and never modified afterwards.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct RemoteError {
    /// Human readable description of the failure.
    pub message: String,
    /// HTTP status, absent for network-level failures.
    pub status: Option<StatusCode>,
    /// Canonical reason phrase for `status`.
    pub status_text: Option<String>,
    /// Raw response payload. Non-JSON payloads are kept as a JSON string.
    pub body: Option<serde_json::Value>,
    /// The transport error that caused this failure, if any.
    #[source]
    pub source: Option<reqwest::Error>,
}

impl RemoteError {
    /// Normalize a non-success HTTP response.
    pub fn from_response(status: StatusCode, raw_body: &str) -> Self {
        let body = parse_body(raw_body);
        let message = body
            .as_ref()
            .and_then(server_message)
            .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));

        Self {
            message,
            status: Some(status),
            status_text: status.canonical_reason().map(str::to_string),
            body,
            source: None,
        }
    }

    /// Normalize a response whose body could not be read.
    ///
    /// The status line did arrive, so it is kept alongside the read error.
    pub fn from_body_error(status: StatusCode, err: reqwest::Error) -> Self {
        let mut normalized = Self::from_transport(err);
        normalized.status = Some(status);
        normalized.status_text = status.canonical_reason().map(str::to_string);
        normalized
    }

    /// Normalize a transport-level failure (DNS, timeout, connection reset...).
    pub fn from_transport(err: reqwest::Error) -> Self {
        let status = err.status();
        let message = err.to_string();
        let message = if message.is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        };

        Self {
            message,
            status,
            status_text: status.and_then(|s| s.canonical_reason()).map(str::to_string),
            body: None,
            source: Some(err),
        }
    }
}

fn parse_body(raw: &str) -> Option<serde_json::Value> {
    if raw.trim().is_empty() {
        return None;
    }
    Some(
        serde_json::from_str(raw)
            .unwrap_or_else(|_| serde_json::Value::String(raw.to_string())),
    )
}

/// Extract the message the server reported, if it reported one.
///
/// Jira answers with `errorMessages` (a list), `errors` (field -> message) or,
/// on the gateway and identity hosts, a single `message` string.
fn server_message(body: &serde_json::Value) -> Option<String> {
    if let Some(messages) = body.get("errorMessages").and_then(|m| m.as_array()) {
        let joined = messages
            .iter()
            .filter_map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        if !joined.is_empty() {
            return Some(joined);
        }
    }

    if let Some(errors) = body.get("errors").and_then(|e| e.as_object()) {
        let field_errors: Vec<String> = errors
            .iter()
            .map(|(field, v)| match v.as_str() {
                Some(s) => format!("{}: {}", field, s),
                None => format!("{}: {}", field, v),
            })
            .collect();
        if !field_errors.is_empty() {
            return Some(field_errors.join(", "));
        }
    }

    body.get("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
