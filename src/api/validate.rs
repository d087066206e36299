//! Pre-flight checks run before a request is dispatched.

use super::error::{ApiError, Result};
use super::types::CreateIssueRequest;

fn is_blank(value: Option<&String>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Check that a creation payload names a project, an issue type and a summary.
///
/// The checks run in that order and the first missing field is reported;
/// later fields are not looked at.
pub fn validate_create_issue(request: &CreateIssueRequest) -> Result<()> {
    let fields = &request.fields;

    if is_blank(fields.project.key.as_ref()) && is_blank(fields.project.id.as_ref()) {
        return Err(ApiError::MissingField("project.key"));
    }

    if is_blank(fields.issuetype.id.as_ref()) && is_blank(fields.issuetype.name.as_ref()) {
        return Err(ApiError::MissingField("issuetype"));
    }

    if is_blank(fields.summary.as_ref()) {
        return Err(ApiError::MissingField("summary"));
    }

    Ok(())
}
