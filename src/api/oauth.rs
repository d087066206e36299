//! OAuth 2.0 refresh-token rotation.
//!
//! Exchanges a refresh token for a new access/refresh pair with a single
//! request. The result is handed back to the caller; applying it to a client
//! is an explicit `JiraClient::update_token` call.

use std::time::Duration;

use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::endpoint::{build_http_client, decode_body};
use super::error::{ApiError, RemoteError, Result};
use super::types::TokenPair;
use crate::config::{OAuthConfig, DEFAULT_TIMEOUT_SECS};

/// Body of the refresh request.
#[derive(Serialize)]
struct RefreshRequest<'a> {
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
    refresh_token: &'a str,
}

/// The token endpoint's answer; either token may be missing.
#[derive(Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    scope: Option<String>,
}

impl TokenResponse {
    fn into_pair(self) -> Result<TokenPair> {
        let access_token = self
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or(ApiError::MissingToken("access_token"))?;
        let refresh_token = self
            .refresh_token
            .filter(|t| !t.is_empty())
            .ok_or(ApiError::MissingToken("refresh_token"))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.expires_in,
            scope: self.scope,
        })
    }
}

/// Client for the OAuth token endpoint.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: Client,
    config: OAuthConfig,
}

impl OAuthClient {
    /// Create a token client.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: OAuthConfig) -> Result<Self> {
        config.validate()?;
        let http = build_http_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?;
        Ok(Self { http, config })
    }

    /// The credentials in use.
    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    /// Exchange `refresh_token` for a new token pair.
    ///
    /// One attempt, no retry. Atlassian rotates refresh tokens, so the
    /// returned refresh token replaces the one passed in.
    ///
    /// # Errors
    ///
    /// - `ApiError::Remote` if the endpoint rejects the exchange or cannot be reached
    /// - `ApiError::MissingToken` if the response lacks either token
    #[instrument(skip_all, fields(token_url = %self.config.token_url))]
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        debug!("Refreshing access token");

        let body = RefreshRequest {
            grant_type: "refresh_token",
            client_id: &self.config.client_id,
            client_secret: &self.config.client_secret,
            refresh_token,
        };

        let response = self
            .http
            .post(&self.config.token_url)
            .header(header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(RemoteError::from_transport)?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RemoteError::from_body_error(status, e))?;

        if !status.is_success() {
            let err = RemoteError::from_response(status, &text);
            warn!(status = status.as_u16(), error = %err, "Token refresh rejected");
            return Err(err.into());
        }

        let pair = decode_body::<TokenResponse>(&text)?.into_pair()?;
        info!(expires_in = ?pair.expires_in, "Access token refreshed");
        Ok(pair)
    }
}
