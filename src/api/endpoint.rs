//! Request dispatch for one API family.
//!
//! An [`Endpoint`] pairs a base URL with the shared session and turns a
//! method, a relative path and optional body into one HTTP call. Successful
//! responses are decoded into the caller's type; anything else becomes a
//! normalized [`RemoteError`]. Nothing is retried.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Client, Method, Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::error::{ApiError, RemoteError, Result};
use super::logger::Logger;
use super::session::Session;

/// Header Jira requires on multipart uploads to skip its XSRF check.
const ATLASSIAN_TOKEN_HEADER: &str = "x-atlassian-token";

/// Build the HTTP client shared by all endpoints.
pub(crate) fn build_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("jira-cloud/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ApiError::Http)
}

/// Per-call query parameters and header overrides.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    query: Vec<(String, String)>,
    headers: HeaderMap,
}

impl RequestOptions {
    /// No overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter. Repeating a name sends it repeatedly.
    pub fn query(mut self, name: &str, value: impl ToString) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    /// Add a query parameter when `value` is set.
    pub fn query_opt<V: ToString>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.query(name, v),
            None => self,
        }
    }

    /// Add a comma-joined list parameter, e.g. `fields=summary,status`.
    ///
    /// Nothing is added for an empty list.
    pub fn list(self, name: &str, values: &[String]) -> Self {
        if values.is_empty() {
            self
        } else {
            self.query(name, values.join(","))
        }
    }

    /// Set a header, replacing the default of the same name.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// The query parameters in insertion order.
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    fn apply(&self, mut builder: RequestBuilder) -> RequestBuilder {
        if !self.query.is_empty() {
            builder = builder.query(&self.query);
        }
        if !self.headers.is_empty() {
            builder = builder.headers(self.headers.clone());
        }
        builder
    }
}

/// One API family: a base URL sharing the client's session and transport.
#[derive(Clone)]
pub struct Endpoint {
    http: Client,
    base_url: String,
    session: Arc<Session>,
    logger: Arc<dyn Logger>,
}

impl Endpoint {
    /// Create an endpoint rooted at `base_url` (no trailing slash).
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        session: Arc<Session>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            session,
            logger,
        }
    }

    /// The base URL every path is resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve `path` against the base URL.
    pub fn url(&self, path: &str) -> String {
        if path.is_empty() || path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn authorized(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header(header::AUTHORIZATION, self.session.header_value())
            .header(header::ACCEPT, "application/json")
    }

    /// Build, without sending, a JSON request.
    ///
    /// The bearer token is read from the session now and is baked into the
    /// returned request.
    pub fn build_request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<Request>
    where
        B: Serialize + ?Sized,
    {
        let mut builder = self
            .authorized(method, path)
            .header(header::CONTENT_TYPE, "application/json");
        builder = options.apply(builder);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        builder.build().map_err(ApiError::Http)
    }

    /// Send a JSON request and decode the response body as `T`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Remote` for any non-success status or network
    /// failure, and `ApiError::InvalidResponse` if a success body does not
    /// decode as `T`.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.build_request(method, path, body, options)?;
        self.execute(request).await
    }

    /// `GET path`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, options: &RequestOptions) -> Result<T> {
        self.request::<T, ()>(Method::GET, path, None, options).await
    }

    /// `POST path` with a JSON body.
    pub async fn post<T, B>(&self, path: &str, body: &B, options: &RequestOptions) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body), options).await
    }

    /// `PUT path` with a JSON body.
    pub async fn put<T, B>(&self, path: &str, body: &B, options: &RequestOptions) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, Some(body), options).await
    }

    /// `DELETE path`.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<T> {
        self.request::<T, ()>(Method::DELETE, path, None, options).await
    }

    /// `POST path` with a multipart body.
    ///
    /// The JSON content type is left off so the transport can set the
    /// multipart boundary, and the XSRF bypass header is added.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
        options: &RequestOptions,
    ) -> Result<T> {
        let builder = self
            .authorized(Method::POST, path)
            .header(ATLASSIAN_TOKEN_HEADER, "no-check");
        let request = options
            .apply(builder)
            .multipart(form)
            .build()
            .map_err(ApiError::Http)?;
        self.execute(request).await
    }

    /// Send a built request and handle its response.
    #[instrument(skip_all, fields(method = %request.method(), url = %request.url()))]
    async fn execute<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
        let description = format!("{} {}", request.method(), request.url());
        debug!("Sending request");
        self.logger.debug(&description);

        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                let err = RemoteError::from_transport(e);
                warn!(error = %err, "Request failed before a response was received");
                self.logger
                    .error(&format!("{} failed: {}", description, err.message));
                return Err(err.into());
            }
        };

        self.handle_response(response, &description).await
    }

    /// Check the status and decode the body.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
        description: &str,
    ) -> Result<T> {
        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                let err = RemoteError::from_body_error(status, e);
                warn!(status = status.as_u16(), error = %err, "Failed to read response body");
                self.logger.error(&format!(
                    "{} failed with {}: {}",
                    description,
                    status.as_u16(),
                    err.message
                ));
                return Err(err.into());
            }
        };

        if status.is_success() {
            debug!(status = status.as_u16(), "Request succeeded");
            return decode_body(&body);
        }

        debug!("Error response body: {}", body);
        let err = RemoteError::from_response(status, &body);
        warn!(status = status.as_u16(), error = %err, "Request rejected");
        self.logger.error(&format!(
            "{} failed with {}: {}",
            description,
            status.as_u16(),
            err.message
        ));
        Err(err.into())
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

/// Decode a success body; an empty body decodes as JSON `null`.
pub(crate) fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body)
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
}
