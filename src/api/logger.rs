//! Pluggable diagnostic logger.
//!
//! Callers can hand the client any [`Logger`]; by default nothing is emitted
//! through it. The client always records `tracing` spans regardless.

use std::fmt;

/// A sink for the client's diagnostic messages.
pub trait Logger: Send + Sync + fmt::Debug {
    /// Informational message.
    fn info(&self, message: &str);
    /// Something unexpected that did not fail the operation.
    fn warn(&self, message: &str);
    /// A failed operation.
    fn error(&self, message: &str);
    /// Request-level detail.
    fn debug(&self, message: &str);
}

/// Discards everything. Used when no logger is supplied.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
    fn debug(&self, _message: &str) {}
}

/// Forwards messages to `tracing` under the `jira_cloud::client` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(target: "jira_cloud::client", "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "jira_cloud::client", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "jira_cloud::client", "{}", message);
    }

    fn debug(&self, message: &str) {
        tracing::debug!(target: "jira_cloud::client", "{}", message);
    }
}
