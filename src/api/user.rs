//! Users
//!
//! The resource record served by the API, plus the contact checks the
//! client runs before dispatching a create.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub active: bool,
    /// Set by the backend when the user is created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(id: u64, name: impl Into<String>, email: impl Into<String>, active: bool) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            active,
            created_at: None,
        }
    }

    /// Domain part of the email, if it has one
    pub fn domain(&self) -> Option<&str> {
        email_domain(&self.email)
    }
}

/// Text between the first `@` and the next `@` (or the end)
pub fn email_domain(email: &str) -> Option<&str> {
    email.split('@').nth(1)
}

/// Check the email shape: an `@` followed by a domain containing a `.`
pub fn is_valid_email(email: &str) -> bool {
    email_domain(email).is_some_and(|domain| domain.contains('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("@x.y"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("alice.example.com"));
        assert!(!is_valid_email("alice@example"));
        assert!(!is_valid_email(""));
        // Only the segment right after the first '@' counts
        assert!(!is_valid_email("a@b@c.d"));
    }

    #[test]
    fn test_domain() {
        let user = User::new(1, "Alice", "alice@example.com", true);
        assert_eq!(user.domain(), Some("example.com"));
        assert_eq!(email_domain("no-at-sign"), None);
    }

    #[test]
    fn test_created_at_skipped_when_absent() {
        let user = User::new(2, "Bob", "bob@example.com", false);
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("created_at").is_none());
        assert_eq!(json["active"], false);
    }
}
