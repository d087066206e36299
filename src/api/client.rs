//! Jira Cloud API client implementation.
//!
//! [`JiraClient`] routes every operation to one of three endpoint families:
//! the core REST API (`rest/api/{2|3}`), the agile API (`rest/agile/1.0`) and
//! the identity API (`/me`). All three share one bearer-token session.

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::Url;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use super::endpoint::{build_http_client, Endpoint, RequestOptions};
use super::error::{ApiError, Result};
use super::logger::{Logger, NoopLogger};
use super::paginate::{
    collect_all, collect_up_to, PageRequest, AGILE_PAGE_SIZE, SEARCH_PAGE_SIZE, VALUES_PAGE_SIZE,
};
use super::session::Session;
use super::types::{
    Attachment, Board, BoardPage, BoardQuery, CreateIssueRequest, CreatedIssue, CurrentUser,
    IdRef, Issue, IssueLinkRequest, IssueQuery, IssueTypeSchemeProjects, IssueUpdate,
    PagedResponse, Project, SearchOptions, SearchResult, Transition, TransitionRequest,
    TransitionsResponse,
};
use super::validate::validate_create_issue;
use crate::config::ClientConfig;

/// The Jira Cloud API client.
///
/// Cheap to clone; clones share the transport and the session.
#[derive(Debug, Clone)]
pub struct JiraClient {
    core: Endpoint,
    agile: Endpoint,
    identity: Endpoint,
    session: Arc<Session>,
    logger: Arc<dyn Logger>,
}

impl JiraClient {
    /// Create a client that logs only through `tracing`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built. No request is made.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Self::with_logger(config, Arc::new(NoopLogger))
    }

    /// Create a client that also reports to `logger`.
    pub fn with_logger(config: &ClientConfig, logger: Arc<dyn Logger>) -> Result<Self> {
        config.validate()?;

        let http = build_http_client(config.timeout())?;
        let session = Arc::new(Session::new(config.access_token.clone()));

        let endpoint = |base_url: String| -> Result<Endpoint> {
            Ok(Endpoint::new(
                http.clone(),
                normalize_base_url(&base_url)?,
                Arc::clone(&session),
                Arc::clone(&logger),
            ))
        };

        let client = Self {
            core: endpoint(config.core_base_url())?,
            agile: endpoint(config.agile_base_url())?,
            identity: endpoint(config.identity_base_url())?,
            session: Arc::clone(&session),
            logger: Arc::clone(&logger),
        };

        info!(
            cloud_id = %config.cloud_id,
            api_version = %config.api_version,
            "Jira client created"
        );
        Ok(client)
    }

    /// The core REST API endpoint.
    pub fn core(&self) -> &Endpoint {
        &self.core
    }

    /// The agile API endpoint.
    pub fn agile(&self) -> &Endpoint {
        &self.agile
    }

    /// The identity API endpoint.
    pub fn identity(&self) -> &Endpoint {
        &self.identity
    }

    // ----------------------------------------------------------------------
    // Session
    // ----------------------------------------------------------------------

    /// Replace the access token for all three endpoint families.
    ///
    /// Requests issued after this returns use `token`; requests already in
    /// flight keep the token they were sent with.
    pub fn update_token(&self, token: impl Into<String>) {
        self.session.set_token(token);
        info!("Access token updated");
        self.logger.info("Access token updated");
    }

    /// The current access token.
    pub fn token(&self) -> String {
        self.session.token()
    }

    // ----------------------------------------------------------------------
    // Identity API
    // ----------------------------------------------------------------------

    /// Get the user the access token belongs to.
    ///
    /// Calls `GET /me` on the identity API.
    #[instrument(skip(self))]
    pub async fn get_current_user(&self) -> Result<CurrentUser> {
        let user: CurrentUser = self.identity.get("/me", &RequestOptions::new()).await?;
        debug!(account_id = %user.account_id, "Fetched current user");
        Ok(user)
    }

    // ----------------------------------------------------------------------
    // Issues
    // ----------------------------------------------------------------------

    /// Create an issue.
    ///
    /// The payload is validated first; a missing project, issue type or
    /// summary fails without contacting the server.
    #[instrument(skip_all)]
    pub async fn create_issue(&self, request: &CreateIssueRequest) -> Result<CreatedIssue> {
        if let Err(e) = validate_create_issue(request) {
            warn!(error = %e, "Rejected issue creation payload");
            self.logger
                .warn(&format!("Rejected issue creation payload: {}", e));
            return Err(e);
        }

        let created: CreatedIssue = self
            .core
            .post("/issue", request, &RequestOptions::new())
            .await?;
        info!(issue_key = %created.key, "Created issue");
        self.logger.info(&format!("Created issue {}", created.key));
        Ok(created)
    }

    /// Get a single issue by key or id.
    #[instrument(skip(self, query), fields(issue_key = %key))]
    pub async fn get_issue(&self, key: &str, query: &IssueQuery) -> Result<Issue> {
        let options = RequestOptions::new()
            .list("fields", &query.fields)
            .list("expand", &query.expand);

        let issue: Issue = self.core.get(&issue_path(key), &options).await?;
        debug!("Fetched issue: {}", issue.key);
        Ok(issue)
    }

    /// Update an issue's fields.
    ///
    /// An empty update is sent as-is; the server decides what it means.
    #[instrument(skip(self, update), fields(issue_key = %key))]
    pub async fn update_issue(&self, key: &str, update: &IssueUpdate) -> Result<()> {
        self.core
            .put(&issue_path(key), update, &RequestOptions::new())
            .await
    }

    /// Delete an issue, optionally with its subtasks.
    #[instrument(skip(self), fields(issue_key = %key))]
    pub async fn delete_issue(&self, key: &str, delete_subtasks: bool) -> Result<()> {
        let options = RequestOptions::new().query("deleteSubtasks", delete_subtasks);
        self.core
            .delete::<()>(&issue_path(key), &options)
            .await?;
        info!("Deleted issue");
        Ok(())
    }

    /// Link two issues.
    #[instrument(skip_all, fields(link_type = %link.link_type.name))]
    pub async fn create_issue_link(&self, link: &IssueLinkRequest) -> Result<()> {
        self.core
            .post("/issueLink", link, &RequestOptions::new())
            .await
    }

    /// List the transitions currently available on an issue.
    #[instrument(skip(self), fields(issue_key = %key))]
    pub async fn get_transitions(&self, key: &str) -> Result<Vec<Transition>> {
        let path = format!("{}/transitions", issue_path(key));
        let response: TransitionsResponse = self.core.get(&path, &RequestOptions::new()).await?;
        debug!("Found {} transitions", response.transitions.len());
        Ok(response.transitions)
    }

    /// Move an issue along a workflow transition.
    ///
    /// `fields` sets values required by the transition screen, if any.
    #[instrument(skip(self, fields), fields(issue_key = %key))]
    pub async fn transition_issue(
        &self,
        key: &str,
        transition_id: &str,
        fields: Option<&Map<String, Value>>,
    ) -> Result<()> {
        let path = format!("{}/transitions", issue_path(key));
        let body = TransitionRequest {
            transition: IdRef { id: transition_id },
            fields,
        };
        self.core
            .post::<(), _>(&path, &body, &RequestOptions::new())
            .await?;
        info!("Transitioned issue");
        Ok(())
    }

    /// Attach a file to an issue.
    ///
    /// The MIME type is guessed from `file_name`.
    #[instrument(skip(self, content), fields(issue_key = %key, size = content.len()))]
    pub async fn add_attachment(
        &self,
        key: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<Vec<Attachment>> {
        let mime = mime_guess::from_path(file_name).first_or_octet_stream();
        let part = Part::bytes(content)
            .file_name(file_name.to_string())
            .mime_str(mime.essence_str())
            .map_err(ApiError::Http)?;
        let form = Form::new().part("file", part);

        let path = format!("{}/attachments", issue_path(key));
        let attachments: Vec<Attachment> =
            self.core.upload(&path, form, &RequestOptions::new()).await?;
        info!(count = attachments.len(), "Uploaded attachment");
        Ok(attachments)
    }

    // ----------------------------------------------------------------------
    // Search
    // ----------------------------------------------------------------------

    /// Run one page of a JQL search.
    ///
    /// `maxResults` and `startAt` are only sent when set in `options`.
    #[instrument(skip(self, options), fields(jql = %jql))]
    pub async fn search_issues(&self, jql: &str, options: &SearchOptions) -> Result<SearchResult> {
        let query = search_query(jql, options, options.start_at, options.max_results);
        let result: SearchResult = self.core.get("/search", &query).await?;
        debug!("Found {} issues (total: {})", result.issues.len(), result.total);
        Ok(result)
    }

    /// Run a JQL search across all pages.
    ///
    /// With `max_total` unset every match is returned; otherwise at most
    /// `max_total`. `options.max_results` is ignored, pages are always
    /// requested at the search maximum.
    #[instrument(skip(self, options), fields(jql = %jql))]
    pub async fn search_all_issues(
        &self,
        jql: &str,
        options: &SearchOptions,
        max_total: Option<u32>,
    ) -> Result<Vec<Issue>> {
        let start_at = options.start_at.unwrap_or(0);
        let fetch = move |page: PageRequest| async move {
            let query = search_query(jql, options, Some(page.start_at), Some(page.max_results));
            let result: SearchResult = self.core.get("/search", &query).await?;
            Ok::<_, ApiError>(result.issues)
        };

        let issues = match max_total {
            None => collect_all(SEARCH_PAGE_SIZE, start_at, fetch).await?,
            Some(max) => collect_up_to(max, SEARCH_PAGE_SIZE, start_at, fetch).await?,
        };
        info!(count = issues.len(), "Search complete");
        Ok(issues)
    }

    /// Every epic in a project.
    #[instrument(skip(self))]
    pub async fn get_all_epics(&self, project_key: &str) -> Result<Vec<Issue>> {
        let jql = format!(
            "project = \"{}\" AND issuetype = Epic ORDER BY created ASC",
            escape_jql(project_key)
        );
        self.search_all_issues(&jql, &SearchOptions::default(), None)
            .await
    }

    /// The issues of a project, oldest first, optionally capped.
    #[instrument(skip(self))]
    pub async fn get_project_issues(
        &self,
        project_key: &str,
        max_total: Option<u32>,
    ) -> Result<Vec<Issue>> {
        let jql = format!(
            "project = \"{}\" ORDER BY created ASC",
            escape_jql(project_key)
        );
        self.search_all_issues(&jql, &SearchOptions::default(), max_total)
            .await
    }

    // ----------------------------------------------------------------------
    // Projects and schemes
    // ----------------------------------------------------------------------

    /// All projects visible to the user.
    #[instrument(skip(self))]
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let projects: Vec<Project> = self.core.get("/project", &RequestOptions::new()).await?;
        debug!("Found {} projects", projects.len());
        Ok(projects)
    }

    /// A single project by key or id.
    #[instrument(skip(self))]
    pub async fn get_project(&self, key_or_id: &str) -> Result<Project> {
        let path = format!("/project/{}", urlencoding::encode(key_or_id));
        self.core.get(&path, &RequestOptions::new()).await
    }

    /// The issue type schemes used by the given projects.
    #[instrument(skip(self))]
    pub async fn get_issue_type_schemes(
        &self,
        project_ids: &[String],
    ) -> Result<Vec<IssueTypeSchemeProjects>> {
        let fetch = move |page: PageRequest| async move {
            let query = project_ids
                .iter()
                .fold(page_query(page), |q, id| q.query("projectId", id));
            let response: PagedResponse<IssueTypeSchemeProjects> =
                self.core.get("/issuetypescheme/project", &query).await?;
            Ok::<_, ApiError>(response.values)
        };
        collect_all(VALUES_PAGE_SIZE, 0, fetch).await
    }

    // ----------------------------------------------------------------------
    // Agile API
    // ----------------------------------------------------------------------

    /// One page of boards.
    #[instrument(skip(self))]
    pub async fn list_boards(&self, query: &BoardQuery) -> Result<BoardPage> {
        let options = board_query(query, query.start_at, query.max_results);
        let page: BoardPage = self.agile.get("/board", &options).await?;
        debug!("Found {} boards (last page: {})", page.values.len(), page.is_last);
        Ok(page)
    }

    /// Every board matching `query`.
    #[instrument(skip(self))]
    pub async fn list_all_boards(&self, query: &BoardQuery) -> Result<Vec<Board>> {
        let fetch = move |page: PageRequest| async move {
            let options = board_query(query, Some(page.start_at), Some(page.max_results));
            let response: BoardPage = self.agile.get("/board", &options).await?;
            Ok::<_, ApiError>(response.values)
        };
        collect_all(AGILE_PAGE_SIZE, query.start_at.unwrap_or(0), fetch).await
    }

    /// One page of the issues on a board.
    #[instrument(skip(self, options))]
    pub async fn get_board_issues(
        &self,
        board_id: u64,
        options: &SearchOptions,
    ) -> Result<SearchResult> {
        let query = RequestOptions::new()
            .list("fields", &options.fields)
            .list("expand", &options.expand)
            .query_opt("startAt", options.start_at)
            .query_opt("maxResults", options.max_results);
        let path = format!("/board/{}/issue", board_id);
        self.agile.get(&path, &query).await
    }
}

/// Path of an issue resource, with the key escaped.
fn issue_path(key: &str) -> String {
    format!("/issue/{}", urlencoding::encode(key))
}

fn escape_jql(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn page_query(page: PageRequest) -> RequestOptions {
    RequestOptions::new()
        .query("startAt", page.start_at)
        .query("maxResults", page.max_results)
}

fn search_query(
    jql: &str,
    options: &SearchOptions,
    start_at: Option<u32>,
    max_results: Option<u32>,
) -> RequestOptions {
    RequestOptions::new()
        .query("jql", jql)
        .list("fields", &options.fields)
        .list("expand", &options.expand)
        .query_opt("maxResults", max_results)
        .query_opt("startAt", start_at)
}

fn board_query(
    query: &BoardQuery,
    start_at: Option<u32>,
    max_results: Option<u32>,
) -> RequestOptions {
    RequestOptions::new()
        .query_opt("startAt", start_at)
        .query_opt("maxResults", max_results)
        .query_opt("projectKeyOrId", query.project_key_or_id.as_deref())
        .query_opt("type", query.board_type.as_deref())
        .query_opt("name", query.name.as_deref())
}

/// Normalize a base URL: drop trailing slashes and check that it parses.
fn normalize_base_url(url: &str) -> Result<String> {
    let url = url.trim_end_matches('/');
    let parsed = Url::parse(url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", url, e)))?;

    // Warn if not HTTPS (but don't enforce for localhost/testing)
    let is_local = matches!(parsed.host_str(), Some("localhost") | Some("127.0.0.1"));
    if parsed.scheme() != "https" && !is_local {
        warn!("URL does not use HTTPS: {}. This is insecure for production use.", url);
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use std::ops::Range;

    use reqwest::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{
        body_json, body_partial_json, header, method, path, query_param, query_param_is_missing,
    };
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::logger::testing::RecordingLogger;
    use crate::api::types::CreateIssueFields;
    use crate::config::ApiVersion;

    const CORE: &str = "/cloud-1/rest/api/3";
    const AGILE: &str = "/cloud-1/rest/agile/1.0";

    fn config_for(server: &MockServer, token: &str) -> ClientConfig {
        ClientConfig::new("cloud-1", token)
            .with_api_root(server.uri())
            .with_identity_url(server.uri())
    }

    fn client_for(server: &MockServer) -> JiraClient {
        JiraClient::new(&config_for(server, "T1")).unwrap()
    }

    fn issues_page(range: Range<u32>) -> Value {
        let issues: Vec<Value> = range
            .clone()
            .map(|i| json!({"id": i.to_string(), "key": format!("PROJ-{}", i), "fields": {"summary": format!("Issue {}", i)}}))
            .collect();
        json!({"startAt": range.start, "maxResults": 100, "total": 0, "issues": issues})
    }

    #[test]
    fn test_normalize_base_url_removes_trailing_slash() {
        assert_eq!(
            normalize_base_url("https://api.atlassian.com/ex/jira/abc/").unwrap(),
            "https://api.atlassian.com/ex/jira/abc"
        );
    }

    #[test]
    fn test_normalize_base_url_rejects_garbage() {
        assert!(matches!(
            normalize_base_url("http://"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_issue_path_escapes_key() {
        assert_eq!(issue_path("PROJ-1"), "/issue/PROJ-1");
        assert_eq!(issue_path("a/b"), "/issue/a%2Fb");
    }

    #[test]
    fn test_escape_jql() {
        assert_eq!(escape_jql(r#"A"B"#), r#"A\"B"#);
    }

    #[test]
    fn test_endpoint_families_are_routed() {
        let config = ClientConfig::new("abc", "token").with_api_version(ApiVersion::V2);
        let client = JiraClient::new(&config).unwrap();

        assert_eq!(
            client.core().base_url(),
            "https://api.atlassian.com/ex/jira/abc/rest/api/2"
        );
        assert_eq!(
            client.agile().base_url(),
            "https://api.atlassian.com/ex/jira/abc/rest/agile/1.0"
        );
        assert_eq!(client.identity().base_url(), "https://api.atlassian.com");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = JiraClient::new(&ClientConfig::new("", "token"));
        assert!(matches!(result, Err(ApiError::Config(_))));
    }

    #[test]
    fn test_update_token_applies_to_all_families() {
        let client = JiraClient::new(&ClientConfig::new("abc", "T1")).unwrap();
        let options = RequestOptions::new();
        let built_before = client
            .core()
            .build_request::<()>(reqwest::Method::GET, "/myself", None, &options)
            .unwrap();

        client.update_token("T2");

        for endpoint in [client.core(), client.agile(), client.identity()] {
            let request = endpoint
                .build_request::<()>(reqwest::Method::GET, "/x", None, &options)
                .unwrap();
            assert_eq!(
                request.headers()[reqwest::header::AUTHORIZATION],
                "Bearer T2"
            );
        }
        assert_eq!(
            built_before.headers()[reqwest::header::AUTHORIZATION],
            "Bearer T1"
        );
        assert_eq!(client.token(), "T2");
    }

    #[tokio::test]
    async fn test_requests_carry_bearer_and_json_headers() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/me"))
            .and(header("Authorization", "Bearer T1"))
            .and(header("Accept", "application/json"))
            .and(header("Content-Type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "account_id": "abc123",
                "name": "Mia Krystof",
                "email": "mia@example.com"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let user = client_for(&server).get_current_user().await.unwrap();
        assert_eq!(user.account_id, "abc123");
    }

    #[tokio::test]
    async fn test_update_token_used_by_next_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/me"))
            .and(header("Authorization", "Bearer T2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"account_id": "abc"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.update_token("T2");
        client.get_current_user().await.unwrap();
    }

    #[tokio::test]
    async fn test_get_issue_sends_comma_joined_fields_and_expand() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("{}/issue/PROJ-1", CORE)))
            .and(query_param("fields", "a,b"))
            .and(query_param("expand", "c"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "10001",
                "key": "PROJ-1",
                "fields": {"summary": "Hello"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let query = IssueQuery::default().fields(["a", "b"]).expand(["c"]);
        let issue = client_for(&server).get_issue("PROJ-1", &query).await.unwrap();
        assert_eq!(issue.summary(), "Hello");
    }

    #[tokio::test]
    async fn test_not_found_is_normalized_with_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("{}/issue/NOPE-1", CORE)))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "errorMessages": ["Issue does not exist or you do not have permission to see it."],
                "errors": {}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_issue("NOPE-1", &IssueQuery::default())
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        let remote = err.as_remote().unwrap();
        assert_eq!(remote.status, Some(StatusCode::NOT_FOUND));
        assert_eq!(remote.status_text.as_deref(), Some("Not Found"));
        assert_eq!(
            remote.message,
            "Issue does not exist or you do not have permission to see it."
        );
        assert!(remote.body.is_some());
        assert!(remote.source.is_none());
    }

    #[tokio::test]
    async fn test_network_failure_is_normalized_without_status() {
        // Nothing listens on port 9 locally.
        let config = ClientConfig::new("cloud-1", "T1").with_api_root("http://127.0.0.1:9");
        let client = JiraClient::new(&config).unwrap();

        let err = client
            .get_issue("PROJ-1", &IssueQuery::default())
            .await
            .unwrap_err();

        let remote = err.as_remote().unwrap();
        assert!(remote.status.is_none());
        assert!(remote.source.is_some());
        assert!(!remote.message.is_empty());
    }

    #[tokio::test]
    async fn test_failures_are_reported_to_logger() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/me"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "code": 401,
                "message": "Unauthorized"
            })))
            .mount(&server)
            .await;

        let recorder = Arc::new(RecordingLogger::default());
        let client =
            JiraClient::with_logger(&config_for(&server, "T1"), recorder.clone()).unwrap();

        let err = client.get_current_user().await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Unauthorized");
        assert_eq!(recorder.levels(), vec!["debug", "error"]);
    }

    #[tokio::test]
    async fn test_create_issue_validates_before_sending() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let request = CreateIssueRequest {
            fields: CreateIssueFields {
                summary: Some("No project".to_string()),
                ..Default::default()
            },
        };
        let err = client_for(&server).create_issue(&request).await.unwrap_err();

        assert!(matches!(err, ApiError::MissingField("project.key")));
        assert!(err.status().is_none());
    }

    #[tokio::test]
    async fn test_rejected_payload_is_reported_to_logger() {
        let server = MockServer::start().await;
        let recorder = Arc::new(RecordingLogger::default());
        let client =
            JiraClient::with_logger(&config_for(&server, "T1"), recorder.clone()).unwrap();

        let mut request = CreateIssueRequest::new("PROJ", "Task", "Summary");
        request.fields.summary = None;
        client.create_issue(&request).await.unwrap_err();

        assert_eq!(recorder.levels(), vec!["warn"]);
        let entries = recorder.entries.lock().unwrap();
        assert!(entries[0].1.contains("summary"));
    }

    #[tokio::test]
    async fn test_create_issue_posts_payload() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("{}/issue", CORE)))
            .and(body_partial_json(json!({
                "fields": {
                    "project": {"key": "PROJ"},
                    "issuetype": {"name": "Task"},
                    "summary": "Write docs"
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "10002",
                "key": "PROJ-2",
                "self": "https://example.test/rest/api/3/issue/10002"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let created = client_for(&server)
            .create_issue(&CreateIssueRequest::new("PROJ", "Task", "Write docs"))
            .await
            .unwrap();
        assert_eq!(created.key, "PROJ-2");
    }

    #[tokio::test]
    async fn test_update_issue_accepts_no_content() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path(format!("{}/issue/PROJ-1", CORE)))
            .and(body_json(json!({"fields": {"summary": "Renamed"}})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .update_issue("PROJ-1", &IssueUpdate::default().set("summary", "Renamed"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_issue_with_subtasks() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path(format!("{}/issue/PROJ-1", CORE)))
            .and(query_param("deleteSubtasks", "true"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).delete_issue("PROJ-1", true).await.unwrap();
    }

    #[tokio::test]
    async fn test_transitions_list_and_execute() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("{}/issue/PROJ-1/transitions", CORE)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "transitions": [
                    {"id": "21", "name": "Start Progress",
                     "to": {"id": "3", "name": "In Progress"}, "hasScreen": false}
                ]
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(format!("{}/issue/PROJ-1/transitions", CORE)))
            .and(body_json(json!({"transition": {"id": "21"}})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let transitions = client.get_transitions("PROJ-1").await.unwrap();
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].to.as_ref().unwrap().name, "In Progress");

        client
            .transition_issue("PROJ-1", &transitions[0].id, None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_issue_link() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("{}/issueLink", CORE)))
            .and(body_partial_json(json!({
                "type": {"name": "Blocks"},
                "inwardIssue": {"key": "PROJ-2"},
                "outwardIssue": {"key": "PROJ-1"}
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .create_issue_link(&IssueLinkRequest::new("Blocks", "PROJ-2", "PROJ-1"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_add_attachment_is_multipart_with_xsrf_header() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("{}/issue/PROJ-1/attachments", CORE)))
            .and(header("X-Atlassian-Token", "no-check"))
            .and(header("Authorization", "Bearer T1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "10000", "filename": "notes.txt", "size": 5, "mimeType": "text/plain"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let attachments = client_for(&server)
            .add_attachment("PROJ-1", "notes.txt", b"hello".to_vec())
            .await
            .unwrap();
        assert_eq!(attachments[0].filename, "notes.txt");

        let requests = server.received_requests().await.unwrap();
        let content_type = requests[0]
            .headers
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.starts_with("multipart/form-data; boundary="));
        let body = String::from_utf8_lossy(&requests[0].body).to_lowercase();
        assert!(body.contains("filename=\"notes.txt\""));
        assert!(body.contains("content-type: text/plain"));
    }

    #[tokio::test]
    async fn test_search_issues_single_page() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("{}/search", CORE)))
            .and(query_param("jql", "project = PROJ"))
            .and(query_param("fields", "summary,status"))
            .and(query_param("maxResults", "10"))
            .and(query_param_is_missing("startAt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(issues_page(0..3)))
            .expect(1)
            .mount(&server)
            .await;

        let options = SearchOptions::default()
            .fields(["summary", "status"])
            .max_results(10);
        let result = client_for(&server)
            .search_issues("project = PROJ", &options)
            .await
            .unwrap();
        assert_eq!(result.issues.len(), 3);
    }

    #[tokio::test]
    async fn test_search_all_issues_unbounded_pages_until_short_page() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("{}/search", CORE)))
            .and(query_param("startAt", "0"))
            .and(query_param("maxResults", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(issues_page(0..100)))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!("{}/search", CORE)))
            .and(query_param("startAt", "100"))
            .and(query_param("maxResults", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(issues_page(100..130)))
            .expect(1)
            .mount(&server)
            .await;

        let issues = client_for(&server)
            .search_all_issues("project = PROJ", &SearchOptions::default(), None)
            .await
            .unwrap();

        assert_eq!(issues.len(), 130);
        assert_eq!(issues[0].key, "PROJ-0");
        assert_eq!(issues[129].key, "PROJ-129");
    }

    #[tokio::test]
    async fn test_search_all_issues_bounded_stops_at_cap() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("{}/search", CORE)))
            .and(query_param("startAt", "0"))
            .and(query_param("maxResults", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(issues_page(0..100)))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!("{}/search", CORE)))
            .and(query_param("startAt", "100"))
            .and(query_param("maxResults", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(issues_page(100..120)))
            .expect(1)
            .mount(&server)
            .await;

        let issues = client_for(&server)
            .get_project_issues("PROJ", Some(120))
            .await
            .unwrap();
        assert_eq!(issues.len(), 120);
    }

    #[tokio::test]
    async fn test_search_all_issues_page_error_fails_whole_operation() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("{}/search", CORE)))
            .and(query_param("startAt", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(issues_page(0..100)))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!("{}/search", CORE)))
            .and(query_param("startAt", "100"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .search_all_issues("project = PROJ", &SearchOptions::default(), None)
            .await
            .unwrap_err();
        assert!(err.is_server_error());
    }

    #[tokio::test]
    async fn test_get_all_epics_uses_epic_jql() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("{}/search", CORE)))
            .and(query_param(
                "jql",
                "project = \"PROJ\" AND issuetype = Epic ORDER BY created ASC",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(issues_page(0..2)))
            .expect(1)
            .mount(&server)
            .await;

        let epics = client_for(&server).get_all_epics("PROJ").await.unwrap();
        assert_eq!(epics.len(), 2);
    }

    #[tokio::test]
    async fn test_projects() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("{}/project", CORE)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "10000", "key": "PROJ", "name": "Project"},
                {"id": "10001", "key": "OPS", "name": "Operations"}
            ])))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!("{}/project/OPS", CORE)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "10001", "key": "OPS", "name": "Operations",
                "issueTypes": [{"id": "1", "name": "Task"}]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let projects = client.list_projects().await.unwrap();
        assert_eq!(projects.len(), 2);

        let project = client.get_project("OPS").await.unwrap();
        assert_eq!(project.issue_types[0].name, "Task");
    }

    #[tokio::test]
    async fn test_issue_type_schemes_repeat_project_id() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("{}/issuetypescheme/project", CORE)))
            .and(query_param("startAt", "0"))
            .and(query_param("maxResults", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "startAt": 0, "maxResults": 50, "total": 1, "isLast": true,
                "values": [{
                    "issueTypeScheme": {"id": "10000", "name": "Default Issue Type Scheme", "isDefault": true},
                    "projectIds": ["10000", "10001"]
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let ids = vec!["10000".to_string(), "10001".to_string()];
        let schemes = client_for(&server).get_issue_type_schemes(&ids).await.unwrap();
        assert_eq!(schemes.len(), 1);
        assert!(schemes[0].issue_type_scheme.is_default);

        let requests = server.received_requests().await.unwrap();
        let project_ids: Vec<String> = requests[0]
            .url
            .query_pairs()
            .filter(|(k, _)| k == "projectId")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(project_ids, ids);
    }

    #[tokio::test]
    async fn test_list_boards_single_page() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("{}/board", AGILE)))
            .and(query_param("projectKeyOrId", "PROJ"))
            .and(query_param("startAt", "0"))
            .and(query_param("maxResults", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "startAt": 0, "maxResults": 2, "isLast": false,
                "values": [{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let query = BoardQuery {
            project_key_or_id: Some("PROJ".to_string()),
            start_at: Some(0),
            max_results: Some(2),
            ..Default::default()
        };
        let page = client_for(&server).list_boards(&query).await.unwrap();
        assert_eq!(page.values.len(), 2);
        assert!(!page.is_last);
    }

    #[tokio::test]
    async fn test_list_all_boards_paginates() {
        let server = MockServer::start().await;
        let boards = |range: Range<u64>| -> Value {
            let values: Vec<Value> = range
                .map(|i| json!({"id": i, "name": format!("Board {}", i)}))
                .collect();
            json!({"values": values})
        };

        Mock::given(method("GET"))
            .and(path(format!("{}/board", AGILE)))
            .and(query_param("startAt", "0"))
            .and(query_param("maxResults", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(boards(0..50)))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!("{}/board", AGILE)))
            .and(query_param("startAt", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(boards(50..51)))
            .expect(1)
            .mount(&server)
            .await;

        let all = client_for(&server)
            .list_all_boards(&BoardQuery::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 51);
        assert_eq!(all[50].id, 50);
    }

    #[tokio::test]
    async fn test_get_board_issues() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("{}/board/84/issue", AGILE)))
            .and(query_param("fields", "summary"))
            .respond_with(ResponseTemplate::new(200).set_body_json(issues_page(0..5)))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .get_board_issues(84, &SearchOptions::default().fields(["summary"]))
            .await
            .unwrap();
        assert_eq!(result.issues.len(), 5);
    }
}
