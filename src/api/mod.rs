//! Jira Cloud API client and types.
//!
//! This module provides the interface for communicating with the Jira Cloud
//! REST, agile and identity APIs using an OAuth bearer token.

mod client;
mod endpoint;
mod error;
mod logger;
mod oauth;
mod paginate;
mod session;
pub mod types;
mod validate;

pub use client::JiraClient;
pub use endpoint::{Endpoint, RequestOptions};
pub use error::{ApiError, RemoteError, Result};
pub use logger::{Logger, NoopLogger, TracingLogger};
pub use oauth::OAuthClient;
pub use paginate::{
    collect_all, collect_up_to, PageRequest, AGILE_PAGE_SIZE, SEARCH_PAGE_SIZE, VALUES_PAGE_SIZE,
};
pub use session::Session;
pub use types::{
    AtlassianDoc, Attachment, Board, BoardPage, BoardQuery, CreateIssueRequest, CreatedIssue,
    CurrentUser, Issue, IssueLinkRequest, IssueQuery, IssueTypeSchemeProjects, IssueUpdate,
    PagedResponse, Project, SearchOptions, SearchResult, TokenPair, Transition,
};
pub use validate::validate_create_issue;
