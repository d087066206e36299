//! Bearer-token session shared by every endpoint family.
//!
//! The core, agile and identity endpoints all hold the same `Arc<Session>`, so
//! replacing the token here is immediately visible to all three. Requests that
//! were already built keep the header they were built with.

use std::fmt;
use std::sync::{PoisonError, RwLock};

/// The current OAuth access token.
pub struct Session {
    token: RwLock<String>,
}

impl Session {
    /// Create a session holding `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(token.into()),
        }
    }

    /// Replace the token.
    pub fn set_token(&self, token: impl Into<String>) {
        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *guard = token.into();
    }

    /// A copy of the current token.
    pub fn token(&self) -> String {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The complete `Authorization` header value, read at call time.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.token())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_header_value_format() {
        let session = Session::new("abc123");
        assert_eq!(session.header_value(), "Bearer abc123");
    }

    #[test]
    fn test_set_token_visible_through_shared_handles() {
        let session = Arc::new(Session::new("first"));
        let other = Arc::clone(&session);

        session.set_token("second");

        assert_eq!(other.token(), "second");
        assert_eq!(other.header_value(), "Bearer second");
    }

    #[test]
    fn test_session_does_not_expose_token() {
        let session = Session::new("secret_token");
        let debug_output = format!("{:?}", session);

        assert!(!debug_output.contains("secret_token"));
    }
}
