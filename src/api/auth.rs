//! Session Handling
//!
//! Holds the token handed out by a successful login, together with the
//! moment it was issued so callers can tell when it has run out.

use super::http::TokenGrant;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Authenticated session owned by the client
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
    username: String,
    ttl: Duration,
    issued_at: Instant,
}

impl Session {
    pub fn from_grant(username: &str, grant: TokenGrant) -> Self {
        Self {
            token: grant.token,
            username: username.to_string(),
            ttl: Duration::from_secs(grant.expires_in),
            issued_at: Instant::now(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Time left before the token expires
    pub fn remaining(&self) -> Duration {
        self.ttl.saturating_sub(self.issued_at.elapsed())
    }

    /// Check if this session's token is still valid
    pub fn is_valid(&self) -> bool {
        self.issued_at.elapsed() < self.ttl
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            token: self.token.clone(),
            username: self.username.clone(),
            expires_in: self.ttl.as_secs(),
            remaining_secs: self.remaining().as_secs(),
        }
    }
}

/// Serializable snapshot of a session, as reported in client stats
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub token: String,
    pub username: String,
    pub expires_in: u64,
    pub remaining_secs: u64,
}
