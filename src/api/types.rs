//! Jira API request and response types.
//!
//! Response types are lenient: every field a caller can filter out with
//! `fields=` defaults when absent, and fields not modelled here (custom
//! fields in particular) are kept in `extra`.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The user behind the access token.
///
/// Returned by the identity API's `GET /me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// The user's account ID.
    pub account_id: String,
    /// The user's display name.
    #[serde(default)]
    pub name: String,
    /// The user's email address (may be empty if hidden).
    #[serde(default)]
    pub email: String,
    /// URL of the user's avatar.
    #[serde(default)]
    pub picture: Option<String>,
    /// The user's nickname.
    #[serde(default)]
    pub nickname: Option<String>,
    /// Account status, e.g. "active".
    #[serde(default)]
    pub account_status: Option<String>,
}

/// Avatar URLs for a user or project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarUrls {
    /// 48x48 pixel avatar.
    #[serde(rename = "48x48")]
    pub size_48: Option<String>,
    /// 24x24 pixel avatar.
    #[serde(rename = "24x24")]
    pub size_24: Option<String>,
    /// 16x16 pixel avatar.
    #[serde(rename = "16x16")]
    pub size_16: Option<String>,
    /// 32x32 pixel avatar.
    #[serde(rename = "32x32")]
    pub size_32: Option<String>,
}

/// One page of a JQL search.
///
/// Returned by `GET /rest/api/{v}/search` and the agile board issue listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// The index of the first result.
    #[serde(default)]
    pub start_at: u32,
    /// Maximum results requested.
    #[serde(default)]
    pub max_results: u32,
    /// Total number of matching issues.
    #[serde(default)]
    pub total: u32,
    /// The list of issues.
    #[serde(default)]
    pub issues: Vec<Issue>,
}

impl SearchResult {
    /// Check if there are more pages of results.
    pub fn has_more(&self) -> bool {
        self.start_at + (self.issues.len() as u32) < self.total
    }

    /// Get the starting index for the next page.
    pub fn next_start(&self) -> u32 {
        self.start_at + self.issues.len() as u32
    }
}

/// A Jira issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// The issue ID.
    pub id: String,
    /// The issue key (e.g., "PROJ-123").
    pub key: String,
    /// REST URL of the issue.
    #[serde(rename = "self", default)]
    pub self_url: String,
    /// The issue fields.
    #[serde(default)]
    pub fields: IssueFields,
    /// Expanded sections (`renderedFields`, `changelog`...), when requested.
    #[serde(flatten)]
    pub expanded: HashMap<String, Value>,
}

impl Issue {
    /// Get the issue summary.
    pub fn summary(&self) -> &str {
        &self.fields.summary
    }

    /// Get the issue status name, if the status field was returned.
    pub fn status(&self) -> Option<&str> {
        self.fields.status.as_ref().map(|s| s.name.as_str())
    }

    /// Get the issue type name, if the type field was returned.
    pub fn issue_type(&self) -> Option<&str> {
        self.fields.issuetype.as_ref().map(|t| t.name.as_str())
    }

    /// Get the assignee display name, if assigned.
    pub fn assignee(&self) -> Option<&str> {
        self.fields.assignee.as_ref().map(|a| a.display_name.as_str())
    }

    /// Get the project key, if available.
    pub fn project_key(&self) -> Option<&str> {
        self.fields.project.as_ref().map(|p| p.key.as_str())
    }

    /// A custom or otherwise unmodelled field by id, e.g. `customfield_10016`.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.extra.get(name)
    }

    /// Get the description as plain text, or an empty string if not set.
    ///
    /// Handles both the v3 document format and v2 plain strings.
    pub fn description_text(&self) -> String {
        match &self.fields.description {
            Some(Value::String(s)) => s.clone(),
            Some(v) => serde_json::from_value::<AtlassianDoc>(v.clone())
                .map(|doc| doc.to_plain_text())
                .unwrap_or_default(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.fields.summary)
    }
}

/// Issue fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueFields {
    /// The issue summary/title.
    #[serde(default)]
    pub summary: String,
    /// The description: a document in v3, a string in v2.
    #[serde(default)]
    pub description: Option<Value>,
    /// The issue status.
    #[serde(default)]
    pub status: Option<Status>,
    /// The issue type.
    #[serde(default)]
    pub issuetype: Option<IssueType>,
    /// The issue priority.
    #[serde(default)]
    pub priority: Option<Priority>,
    /// The issue assignee.
    #[serde(default)]
    pub assignee: Option<User>,
    /// The issue reporter.
    #[serde(default)]
    pub reporter: Option<User>,
    /// The project this issue belongs to.
    #[serde(default)]
    pub project: Option<Project>,
    /// The parent issue (epic or parent of a subtask).
    #[serde(default)]
    pub parent: Option<IssueRef>,
    /// Labels attached to the issue.
    #[serde(default)]
    pub labels: Vec<String>,
    /// When the issue was created.
    #[serde(default)]
    pub created: Option<String>,
    /// When the issue was last updated.
    #[serde(default)]
    pub updated: Option<String>,
    /// Every other field, keyed by field id.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// A minimal reference to another issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRef {
    /// The issue ID.
    #[serde(default)]
    pub id: Option<String>,
    /// The issue key.
    pub key: String,
}

/// Issue status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    /// The status ID.
    pub id: String,
    /// The status name (e.g., "To Do", "In Progress", "Done").
    pub name: String,
    /// The status category.
    #[serde(default)]
    pub status_category: Option<StatusCategory>,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Status category (groups statuses into to-do, in-progress, done).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCategory {
    /// The category ID.
    pub id: u32,
    /// The category key.
    pub key: String,
    /// The category name.
    pub name: String,
}

/// Issue type (Bug, Story, Task, Epic, etc.).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueType {
    /// The issue type ID.
    pub id: String,
    /// The issue type name.
    pub name: String,
    /// Whether this is a subtask type.
    #[serde(default)]
    pub subtask: bool,
    /// The issue type description.
    #[serde(default)]
    pub description: Option<String>,
    /// Hierarchy level; epics are 1.
    #[serde(default)]
    pub hierarchy_level: Option<i32>,
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Issue priority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Priority {
    /// The priority ID.
    pub id: String,
    /// The priority name.
    pub name: String,
}

/// A Jira user as embedded in issues.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The user's account ID.
    pub account_id: String,
    /// The user's display name.
    #[serde(default)]
    pub display_name: String,
    /// The user's email address (may be hidden).
    #[serde(default)]
    pub email_address: Option<String>,
    /// Whether the user is active.
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}

/// A Jira project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// The project ID.
    pub id: String,
    /// The project key (e.g., "PROJ").
    pub key: String,
    /// The project name.
    #[serde(default)]
    pub name: String,
    /// "software", "service_desk" or "business".
    #[serde(default)]
    pub project_type_key: Option<String>,
    /// Whether the project is team-managed ("next-gen").
    #[serde(default)]
    pub simplified: Option<bool>,
    /// Issue types available in the project (detail endpoint only).
    #[serde(default)]
    pub issue_types: Vec<IssueType>,
    /// URLs for the project's avatar images.
    #[serde(default)]
    pub avatar_urls: Option<AvatarUrls>,
}

/// A workflow transition available on an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    /// The transition ID, used to execute it.
    pub id: String,
    /// The transition name (e.g., "Start Progress").
    pub name: String,
    /// The status the issue moves to.
    #[serde(default)]
    pub to: Option<Status>,
    /// Whether the transition shows a screen in the UI.
    #[serde(default)]
    pub has_screen: bool,
}

/// Response of `GET /issue/{key}/transitions`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TransitionsResponse {
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

/// Body of `POST /issue/{key}/transitions`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct TransitionRequest<'a> {
    pub transition: IdRef<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<&'a Map<String, Value>>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct IdRef<'a> {
    pub id: &'a str,
}

/// Reference to a project when creating an issue: by key or by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectRef {
    /// The project key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// The project ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Reference to an issue type when creating an issue: by id or by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueTypeRef {
    /// The issue type ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The issue type name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Fields of a new issue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateIssueFields {
    /// Target project.
    #[serde(default)]
    pub project: ProjectRef,
    /// Issue type.
    #[serde(default)]
    pub issuetype: IssueTypeRef,
    /// One-line summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Description: an ADF document for v3, a string for v2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    /// Parent issue, for subtasks and epic children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<IssueKeyRef>,
    /// Labels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    /// Any other field (custom fields, priority, assignee...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /issue`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateIssueRequest {
    /// The new issue's fields.
    pub fields: CreateIssueFields,
}

impl CreateIssueRequest {
    /// A request for `project_key` with an issue type name and summary.
    pub fn new(
        project_key: impl Into<String>,
        issue_type: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            fields: CreateIssueFields {
                project: ProjectRef {
                    key: Some(project_key.into()),
                    id: None,
                },
                issuetype: IssueTypeRef {
                    id: None,
                    name: Some(issue_type.into()),
                },
                summary: Some(summary.into()),
                ..Default::default()
            },
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<Value>) -> Self {
        self.fields.description = Some(description.into());
        self
    }

    /// Set the parent issue by key.
    pub fn with_parent(mut self, parent_key: impl Into<String>) -> Self {
        self.fields.parent = Some(IssueKeyRef {
            key: parent_key.into(),
        });
        self
    }

    /// Set any other field by id.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.extra.insert(name.into(), value.into());
        self
    }
}

/// Response of `POST /issue`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedIssue {
    /// The new issue's ID.
    pub id: String,
    /// The new issue's key.
    pub key: String,
    /// REST URL of the new issue.
    #[serde(rename = "self", default)]
    pub self_url: String,
}

/// Body of `PUT /issue/{key}`.
///
/// `fields` replaces values outright; `update` holds operation lists such as
/// `{"labels": [{"add": "triaged"}]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueUpdate {
    /// Field values to set.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub fields: Map<String, Value>,
    /// Field operations to apply.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub update: Map<String, Value>,
}

impl IssueUpdate {
    /// Set `name` to `value`.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Append operations for `name`.
    pub fn operation(mut self, name: impl Into<String>, ops: Value) -> Self {
        self.update.insert(name.into(), ops);
        self
    }

    /// Whether the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.update.is_empty()
    }
}

/// Query options for fetching a single issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueQuery {
    /// Fields to return; all navigable fields when empty.
    pub fields: Vec<String>,
    /// Sections to expand, e.g. `renderedFields`, `changelog`.
    pub expand: Vec<String>,
}

impl IssueQuery {
    /// Restrict the returned fields.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Expand sections.
    pub fn expand<I, S>(mut self, expand: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expand = expand.into_iter().map(Into::into).collect();
        self
    }
}

/// Options for JQL searches and board issue listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Fields to return.
    pub fields: Vec<String>,
    /// Sections to expand.
    pub expand: Vec<String>,
    /// Page size for single-page calls; ignored by the paginated calls.
    pub max_results: Option<u32>,
    /// Index of the first result.
    pub start_at: Option<u32>,
}

impl SearchOptions {
    /// Restrict the returned fields.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Expand sections.
    pub fn expand<I, S>(mut self, expand: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expand = expand.into_iter().map(Into::into).collect();
        self
    }

    /// Set the page size.
    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Set the first result index.
    pub fn start_at(mut self, start_at: u32) -> Self {
        self.start_at = Some(start_at);
        self
    }
}

/// Body of `POST /issueLink`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueLinkRequest {
    /// The link type, by name (e.g. "Blocks").
    #[serde(rename = "type")]
    pub link_type: LinkTypeRef,
    /// The issue on the inward side ("is blocked by").
    pub inward_issue: IssueKeyRef,
    /// The issue on the outward side ("blocks").
    pub outward_issue: IssueKeyRef,
    /// Optional comment added to the outward issue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<Value>,
}

impl IssueLinkRequest {
    /// Link `outward_key` → `inward_key` with the named link type.
    pub fn new(
        link_type: impl Into<String>,
        inward_key: impl Into<String>,
        outward_key: impl Into<String>,
    ) -> Self {
        Self {
            link_type: LinkTypeRef {
                name: link_type.into(),
            },
            inward_issue: IssueKeyRef {
                key: inward_key.into(),
            },
            outward_issue: IssueKeyRef {
                key: outward_key.into(),
            },
            comment: None,
        }
    }
}

/// A link type referenced by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkTypeRef {
    /// The link type name.
    pub name: String,
}

/// An issue referenced by key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueKeyRef {
    /// The issue key.
    pub key: String,
}

/// An uploaded attachment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// The attachment ID.
    pub id: String,
    /// File name.
    pub filename: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// MIME type.
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Download URL.
    #[serde(default)]
    pub content: Option<String>,
}

/// Generic page shape used by the agile API and newer core endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    /// Index of the first value.
    #[serde(default)]
    pub start_at: u32,
    /// Page size used by the server.
    #[serde(default)]
    pub max_results: u32,
    /// Total values, when the server reports it.
    #[serde(default)]
    pub total: Option<u32>,
    /// Whether this is the last page.
    #[serde(default)]
    pub is_last: bool,
    /// The values on this page.
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
}

/// An agile board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    /// The board ID.
    pub id: u64,
    /// The board name.
    pub name: String,
    /// "scrum", "kanban" or "simple".
    #[serde(rename = "type", default)]
    pub board_type: Option<String>,
    /// The project the board lives in.
    #[serde(default)]
    pub location: Option<BoardLocation>,
}

/// Where a board lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardLocation {
    /// The project ID.
    #[serde(default)]
    pub project_id: Option<u64>,
    /// The project key.
    #[serde(default)]
    pub project_key: Option<String>,
    /// The project name.
    #[serde(default)]
    pub project_name: Option<String>,
}

/// One page of boards.
pub type BoardPage = PagedResponse<Board>;

/// Filters for the board listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardQuery {
    /// Only boards of this project.
    pub project_key_or_id: Option<String>,
    /// Only boards of this type ("scrum", "kanban").
    pub board_type: Option<String>,
    /// Only boards whose name contains this.
    pub name: Option<String>,
    /// Index of the first board.
    pub start_at: Option<u32>,
    /// Page size.
    pub max_results: Option<u32>,
}

/// An issue type scheme and the projects that use it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueTypeSchemeProjects {
    /// The scheme.
    pub issue_type_scheme: IssueTypeScheme,
    /// IDs of the projects using it.
    #[serde(default)]
    pub project_ids: Vec<String>,
}

/// An issue type scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueTypeScheme {
    /// The scheme ID.
    pub id: String,
    /// The scheme name.
    pub name: String,
    /// The scheme description.
    #[serde(default)]
    pub description: Option<String>,
    /// ID of the default issue type.
    #[serde(default)]
    pub default_issue_type_id: Option<String>,
    /// Whether this is the site default scheme.
    #[serde(default)]
    pub is_default: bool,
}

/// A fresh access/refresh token pair.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPair {
    /// The new access token.
    pub access_token: String,
    /// The new refresh token (rotating: the old one is now invalid).
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    /// Granted scopes, space separated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Atlassian Document Format (ADF) content.
///
/// Rich text fields (descriptions, comments) use ADF in API v3.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AtlassianDoc {
    /// The document type (always "doc" for root documents).
    #[serde(rename = "type")]
    pub doc_type: String,
    /// The document version (typically 1).
    #[serde(default)]
    pub version: Option<u32>,
    /// The content nodes within the document.
    #[serde(default)]
    pub content: Vec<Value>,
}

impl AtlassianDoc {
    /// Build a document with one paragraph per line of `text`.
    pub fn from_plain_text(text: &str) -> Self {
        let content = text
            .lines()
            .map(|line| {
                if line.is_empty() {
                    serde_json::json!({ "type": "paragraph", "content": [] })
                } else {
                    serde_json::json!({
                        "type": "paragraph",
                        "content": [{ "type": "text", "text": line }]
                    })
                }
            })
            .collect();

        Self {
            content,
            ..Self::default()
        }
    }

    /// Convert ADF content to plain text.
    pub fn to_plain_text(&self) -> String {
        let mut result = String::new();
        for node in &self.content {
            Self::extract_text(node, &mut result);
        }
        result.trim().to_string()
    }

    fn extract_children(node: &Map<String, Value>, result: &mut String) {
        if let Some(Value::Array(items)) = node.get("content") {
            for item in items {
                Self::extract_text(item, result);
            }
        }
    }

    fn extract_text(node: &Value, result: &mut String) {
        let Value::Object(obj) = node else {
            return;
        };

        match obj.get("type").and_then(|t| t.as_str()) {
            Some("text") => {
                if let Some(text) = obj.get("text").and_then(|t| t.as_str()) {
                    result.push_str(text);
                }
            }
            Some("paragraph") | Some("heading") | Some("codeBlock") => {
                Self::extract_children(obj, result);
                if !result.is_empty() && !result.ends_with('\n') {
                    result.push('\n');
                }
            }
            Some("hardBreak") => result.push('\n'),
            Some("listItem") => {
                result.push_str("• ");
                Self::extract_children(obj, result);
            }
            Some("mention") => {
                if let Some(text) = obj
                    .get("attrs")
                    .and_then(|a| a.get("text"))
                    .and_then(|t| t.as_str())
                {
                    result.push('@');
                    result.push_str(text.trim_start_matches('@'));
                }
            }
            Some("inlineCard") | Some("mediaGroup") | Some("mediaSingle") => {}
            _ => Self::extract_children(obj, result),
        }
    }
}

impl Default for AtlassianDoc {
    fn default() -> Self {
        Self {
            doc_type: "doc".to_string(),
            version: Some(1),
            content: vec![],
        }
    }
}

impl From<AtlassianDoc> for Value {
    fn from(doc: AtlassianDoc) -> Self {
        serde_json::to_value(doc).unwrap_or(Value::Null)
    }
}
