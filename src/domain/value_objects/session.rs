//! Authenticated session credential and share tokens

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bearer credential obtained from the external auth provider
///
/// Every call to the character store that acts on the owner's behalf takes a
/// `&Session`, so an operation cannot reach the network without one.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    access_token: String,
}

impl Session {
    /// Returns `None` for a blank token
    pub fn new(access_token: impl Into<String>) -> Option<Self> {
        let access_token = access_token.into().trim().to_string();
        (!access_token.is_empty()).then_some(Self { access_token })
    }

    /// Parse an `Authorization: Bearer <token>` header value
    pub fn from_authorization_header(value: &str) -> Option<Self> {
        let (scheme, token) = value.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return None;
        }
        Self::new(token)
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Revocable read-only credential for a character sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareToken {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bearer_header() {
        let session = Session::from_authorization_header("Bearer abc.def").unwrap();
        assert_eq!(session.access_token(), "abc.def");
        assert!(Session::from_authorization_header("bearer xyz").is_some());
    }

    #[test]
    fn test_rejects_missing_or_blank_token() {
        assert!(Session::from_authorization_header("Bearer ").is_none());
        assert!(Session::from_authorization_header("Basic abc").is_none());
        assert!(Session::from_authorization_header("abc").is_none());
        assert!(Session::new("   ").is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::new("secret").unwrap();
        assert!(!format!("{:?}", session).contains("secret"));
    }
}
