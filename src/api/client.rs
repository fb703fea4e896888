//! Resource Client
//!
//! Translates high-level calls into requests against a [`Backend`] and
//! keeps the session and request counter.

use super::auth::{Session, SessionInfo};
use super::backend::{Backend, SimulatedBackend};
use super::error::ClientError;
use super::http::{
    sanitize_for_log, Body, Method, Payload, Request, Response, LOGIN_PATH, USERS_PATH,
};
use super::user::{is_valid_email, User};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Connection settings for a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }
}

/// Client statistics
#[derive(Debug, Clone, Serialize)]
pub struct ClientStats {
    pub requests_made: u64,
    pub base_url: String,
    pub api_key_set: bool,
    pub authenticated: bool,
    pub session: Option<SessionInfo>,
}

/// Main API client
pub struct ResourceClient<B: Backend = SimulatedBackend> {
    backend: B,
    base_url: String,
    api_key: Option<String>,
    session: Option<Session>,
    request_count: u64,
}

impl ResourceClient<SimulatedBackend> {
    /// Create a client backed by the simulated routing table
    pub fn simulated(config: ClientConfig) -> Self {
        Self::new(config, SimulatedBackend::new())
    }
}

impl<B: Backend> ResourceClient<B> {
    pub fn new(config: ClientConfig, backend: B) -> Self {
        Self {
            backend,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            session: None,
            request_count: 0,
        }
    }

    /// Send one request to the backend
    fn dispatch(&mut self, path: &str, method: Method, payload: Option<Map<String, Value>>) -> Response {
        self.request_count += 1;
        tracing::info!("[{}] {}{}", method, self.base_url, path);

        let request = Request::new(path, method, payload, self.request_count);
        let response = self.backend.handle(&request);

        if let Body::Error(message) = &response.body {
            tracing::warn!(
                "API error: {} {} - {} - {}",
                method,
                path,
                response.status,
                sanitize_for_log(message)
            );
        }

        response
    }

    /// Get all users
    pub fn list_users(&mut self) -> Result<Vec<User>, ClientError> {
        match self.dispatch(USERS_PATH, Method::Get, None).expect_status(200)? {
            Payload::Users(users) => {
                tracing::debug!("Fetched {} users", users.len());
                Ok(users)
            }
            _ => Err(ClientError::UnexpectedPayload { expected: "user list" }),
        }
    }

    /// Create a new user
    ///
    /// The email is checked before anything is sent; an invalid one fails
    /// without touching the request counter.
    pub fn create_user(&mut self, name: &str, email: &str) -> Result<User, ClientError> {
        if name.trim().is_empty() {
            return Err(ClientError::Validation("Name must not be empty".to_string()));
        }
        if !is_valid_email(email) {
            return Err(ClientError::Validation(format!("Invalid email format: {}", email)));
        }

        let payload = json!({ "name": name, "email": email });
        let response = self.dispatch(USERS_PATH, Method::Post, payload.as_object().cloned());

        match response.expect_status(201)? {
            Payload::User(user) => {
                tracing::info!("Created user {} (ID: {})", user.name, user.id);
                Ok(user)
            }
            _ => Err(ClientError::UnexpectedPayload { expected: "user" }),
        }
    }

    /// Authenticate with the API
    ///
    /// Bad credentials are an ordinary `false`, never an error. Any previous
    /// session is dropped when a login fails.
    pub fn login(&mut self, username: &str, password: &str) -> bool {
        let payload = json!({ "username": username, "password": password });
        let response = self.dispatch(LOGIN_PATH, Method::Post, payload.as_object().cloned());

        match response.expect_status(200) {
            Ok(Payload::Token(grant)) => {
                let session = Session::from_grant(username, grant);
                tracing::info!(
                    "Login successful for {}, token expires in {}s",
                    username,
                    session.ttl().as_secs()
                );
                self.session = Some(session);
                true
            }
            Ok(_) => {
                tracing::warn!("Login answered without a token");
                self.session = None;
                false
            }
            Err(e) => {
                tracing::info!("Login failed for {}: {}", username, e);
                self.session = None;
                false
            }
        }
    }

    /// Drop the current session
    pub fn logout(&mut self) {
        if self.session.take().is_some() {
            tracing::info!("Session cleared");
        }
    }

    /// Get client statistics
    pub fn stats(&self) -> ClientStats {
        ClientStats {
            requests_made: self.request_count,
            base_url: self.base_url.clone(),
            api_key_set: self.api_key.is_some(),
            authenticated: self.is_authenticated(),
            session: self.session.as_ref().map(Session::info),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_valid)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn request_count(&self) -> u64 {
        self.request_count
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ResourceClient {
        ResourceClient::simulated(ClientConfig::new("https://api.example.com/"))
    }

    /// Backend that records every request and answers 500
    #[derive(Default)]
    struct FailingBackend {
        seen: Vec<Request>,
    }

    impl Backend for FailingBackend {
        fn handle(&mut self, request: &Request) -> Response {
            self.seen.push(request.clone());
            Response::error(500, "Internal error")
        }
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        assert_eq!(client().base_url(), "https://api.example.com");
    }

    #[test]
    fn test_list_users_counts_request() {
        let mut client = client();
        let users = client.list_users().unwrap();
        assert_eq!(users.len(), 3);
        assert_eq!(client.request_count(), 1);
    }

    #[test]
    fn test_create_user_invalid_email_skips_dispatch() {
        let mut client = client();
        let err = client.create_user("David", "david.example.com").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(client.request_count(), 0);
    }

    #[test]
    fn test_create_user_empty_name() {
        let mut client = client();
        let err = client.create_user("   ", "david@example.com").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(client.request_count(), 0);
    }

    #[test]
    fn test_create_user_success() {
        let mut client = client();
        let user = client.create_user("David", "david@example.com").unwrap();
        assert_eq!(user.id, 999);
        assert_eq!(user.name, "David");
        assert!(user.active);
        assert_eq!(client.request_count(), 1);
    }

    #[test]
    fn test_login_token_uses_request_number() {
        let mut client = client();
        client.list_users().unwrap();
        assert!(client.login("admin", "secret"));
        assert_eq!(client.session().unwrap().token(), "token_for_admin_2");
        assert!(client.stats().authenticated);
    }

    #[test]
    fn test_failed_login_clears_session() {
        let mut client = client();
        assert!(client.login("admin", "secret"));
        assert!(!client.login("admin", "wrong"));
        let stats = client.stats();
        assert!(!stats.authenticated);
        assert!(stats.session.is_none());
        assert_eq!(stats.requests_made, 2);
    }

    #[test]
    fn test_logout() {
        let mut client = client();
        assert!(client.login("admin", "secret"));
        client.logout();
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_backend_errors_propagate() {
        let mut client = ResourceClient::new(ClientConfig::new("http://localhost"), FailingBackend::default());

        let err = client.list_users().unwrap_err();
        assert_eq!(
            err,
            ClientError::Backend {
                status: 500,
                message: "Internal error".to_string()
            }
        );

        let err = client.create_user("David", "david@example.com").unwrap_err();
        assert_eq!(err.status(), Some(500));

        assert!(!client.login("admin", "secret"));
        assert_eq!(client.backend().seen.len(), 3);
        assert_eq!(client.backend().seen[2].path(), "/auth/login");
    }

    #[test]
    fn test_stats_reports_api_key() {
        let config = ClientConfig::new("https://api.example.com").with_api_key(Some("k".into()));
        let client = ResourceClient::simulated(config);
        let stats = client.stats();
        assert!(stats.api_key_set);
        assert_eq!(stats.requests_made, 0);
    }
}
