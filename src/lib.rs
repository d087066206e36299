//! A typed client for Jira Cloud.
//!
//! [`JiraClient`] talks to a single Jira Cloud site through the Atlassian API
//! gateway with an OAuth 2.0 bearer token. It covers the core REST API, the
//! agile API and the identity API, normalizes every failure into an
//! [`ApiError`], and pages through searches and board listings.
//!
//! ```no_run
//! use jira_cloud::{ClientConfig, JiraClient, SearchOptions};
//!
//! # async fn run() -> jira_cloud::api::Result<()> {
//! let client = JiraClient::new(&ClientConfig::new("cloud-id", "access-token"))?;
//! let issues = client
//!     .search_all_issues("project = PROJ", &SearchOptions::default(), Some(200))
//!     .await?;
//! println!("{} issues", issues.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod logging;

pub use api::{ApiError, JiraClient, OAuthClient, RemoteError, SearchOptions};
pub use config::{ApiVersion, ClientConfig, ConfigError, OAuthConfig};
