//! HTTP-style request and response types
//!
//! The client speaks to its backend in terms of these types. Routing is
//! resolved once into an [`Endpoint`] so backends match on a tag instead of
//! comparing strings.

use super::error::ClientError;
use super::user::User;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Maximum length of a message to log (to avoid flooding the log file)
const MAX_LOG_BODY_LENGTH: usize = 200;

pub const USERS_PATH: &str = "/users";
pub const LOGIN_PATH: &str = "/auth/login";

/// Sanitize a message for logging
/// Truncates long messages and strips control characters
pub fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|&i| body.is_char_boundary(i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| c.is_control(), "")
}

/// HTTP-style method tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Known endpoints, resolved from a path and method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ListUsers,
    CreateUser,
    Login,
    Unknown,
}

impl Endpoint {
    pub fn resolve(path: &str, method: Method) -> Self {
        match (path, method) {
            (USERS_PATH, Method::Get) => Self::ListUsers,
            (USERS_PATH, Method::Post) => Self::CreateUser,
            (LOGIN_PATH, Method::Post) => Self::Login,
            _ => Self::Unknown,
        }
    }
}

/// A single request. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    path: String,
    method: Method,
    payload: Option<Map<String, Value>>,
    sequence: u64,
    endpoint: Endpoint,
}

impl Request {
    /// Build a request; `sequence` is the client's request number for it
    pub fn new(
        path: impl Into<String>,
        method: Method,
        payload: Option<Map<String, Value>>,
        sequence: u64,
    ) -> Self {
        let path = path.into();
        let endpoint = Endpoint::resolve(&path, method);
        Self {
            path,
            method,
            payload,
            sequence,
            endpoint,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn payload(&self) -> Option<&Map<String, Value>> {
        self.payload.as_ref()
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// String field from the payload, if present
    pub fn field(&self, name: &str) -> Option<&str> {
        self.payload.as_ref()?.get(name)?.as_str()
    }
}

/// Token handed out by a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenGrant {
    pub token: String,
    /// Lifetime of the token in seconds
    pub expires_in: u64,
}

/// Data carried by a successful response
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    User(User),
    Users(Vec<User>),
    Token(TokenGrant),
}

/// Exactly one of data or error
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Data(Payload),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Body,
}

impl Response {
    pub fn data(status: u16, payload: Payload) -> Self {
        Self {
            status,
            body: Body::Data(payload),
        }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: Body::Error(message.into()),
        }
    }

    /// Take the payload if the status matches `expected`, otherwise
    /// turn the response into a [`ClientError::Backend`]
    pub fn expect_status(self, expected: u16) -> Result<Payload, ClientError> {
        match self.body {
            Body::Data(payload) if self.status == expected => Ok(payload),
            Body::Data(_) => Err(ClientError::Backend {
                status: self.status,
                message: format!("unexpected status {}", self.status),
            }),
            Body::Error(message) => Err(ClientError::Backend {
                status: self.status,
                message,
            }),
        }
    }
}

/// Format a client error for display
pub fn format_api_error(error: &ClientError) -> String {
    match error {
        ClientError::Validation(msg) => sanitize_for_log(msg),
        ClientError::Backend { status, message } => match *status {
            401 => "Authentication failed. Check your username and password.".to_string(),
            403 => "Permission denied.".to_string(),
            404 => "Resource not found.".to_string(),
            400 => "Invalid request. Check your parameters.".to_string(),
            500..=599 => "Service temporarily unavailable. Please try again.".to_string(),
            _ => {
                let sanitized = message
                    .chars()
                    .filter(|c| c.is_ascii_graphic() || *c == ' ')
                    .take(80)
                    .collect::<String>();

                if sanitized.len() < message.len() {
                    format!("Request failed ({}): {}...", status, sanitized)
                } else {
                    format!("Request failed ({}): {}", status, sanitized)
                }
            }
        },
        ClientError::UnexpectedPayload { .. } => {
            "Unexpected response from the service.".to_string()
        }
    }
}
