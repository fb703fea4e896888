//! Backends
//!
//! A [`Backend`] turns a [`Request`] into a [`Response`]. The client never
//! talks to anything else, so swapping the simulated table for another
//! transport only means another implementation of this trait.

use super::http::{Endpoint, Payload, Request, Response, TokenGrant};
use super::user::User;
use chrono::Utc;

/// Identifier the simulated backend gives every created user
pub const CREATED_USER_ID: u64 = 999;

/// Lifetime of a simulated login token in seconds
pub const TOKEN_TTL_SECS: u64 = 3600;

const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "secret";

/// Anything that can answer client requests
pub trait Backend {
    fn handle(&mut self, request: &Request) -> Response;
}

/// Deterministic in-memory backend with a fixed routing table
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedBackend;

impl SimulatedBackend {
    pub fn new() -> Self {
        Self
    }

    /// The fixed user list served by `GET /users`
    pub fn seed_users() -> Vec<User> {
        vec![
            User::new(1, "Alice", "alice@example.com", true),
            User::new(2, "Bob", "bob@example.com", false),
            User::new(3, "Charlie", "charlie@example.com", true),
        ]
    }

    fn create_user(request: &Request) -> Response {
        match (request.field("name"), request.field("email")) {
            (Some(name), Some(email)) => {
                let mut user = User::new(CREATED_USER_ID, name, email, true);
                user.created_at = Some(Utc::now());
                Response::data(201, Payload::User(user))
            }
            _ => Response::error(400, "Invalid users endpoint"),
        }
    }

    fn login(request: &Request) -> Response {
        let username = request.field("username");
        let password = request.field("password");

        match (username, password) {
            (Some(user @ ADMIN_USERNAME), Some(ADMIN_PASSWORD)) => Response::data(
                200,
                Payload::Token(TokenGrant {
                    token: format!("token_for_{}_{}", user, request.sequence()),
                    expires_in: TOKEN_TTL_SECS,
                }),
            ),
            _ => Response::error(401, "Invalid credentials"),
        }
    }
}

impl Backend for SimulatedBackend {
    fn handle(&mut self, request: &Request) -> Response {
        match request.endpoint() {
            Endpoint::ListUsers => Response::data(200, Payload::Users(Self::seed_users())),
            Endpoint::CreateUser => Self::create_user(request),
            Endpoint::Login => Self::login(request),
            Endpoint::Unknown => Response::error(404, "Endpoint not found"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::http::{Body, Method};
    use serde_json::{json, Map, Value};

    fn payload(value: Value) -> Option<Map<String, Value>> {
        value.as_object().cloned()
    }

    #[test]
    fn test_list_users() {
        let mut backend = SimulatedBackend::new();
        let response = backend.handle(&Request::new("/users", Method::Get, None, 1));
        assert_eq!(response.status, 200);
        match response.body {
            Body::Data(Payload::Users(users)) => {
                assert_eq!(users.len(), 3);
                assert_eq!(users.iter().filter(|u| u.active).count(), 2);
                assert_eq!(users[1].name, "Bob");
            }
            other => panic!("unexpected body: {:?}", other),
        }
    }

    #[test]
    fn test_create_user() {
        let mut backend = SimulatedBackend::new();
        let request = Request::new(
            "/users",
            Method::Post,
            payload(json!({"name": "David", "email": "david@example.com"})),
            2,
        );
        let response = backend.handle(&request);
        assert_eq!(response.status, 201);
        match response.body {
            Body::Data(Payload::User(user)) => {
                assert_eq!(user.id, CREATED_USER_ID);
                assert!(user.active);
                assert!(user.created_at.is_some());
            }
            other => panic!("unexpected body: {:?}", other),
        }
    }

    #[test]
    fn test_create_user_missing_fields() {
        let mut backend = SimulatedBackend::new();
        let request = Request::new("/users", Method::Post, payload(json!({"name": "Eve"})), 1);
        assert_eq!(
            backend.handle(&request),
            Response::error(400, "Invalid users endpoint")
        );

        let request = Request::new("/users", Method::Post, None, 2);
        assert_eq!(backend.handle(&request).status, 400);
    }

    #[test]
    fn test_login() {
        let mut backend = SimulatedBackend::new();
        let good = Request::new(
            "/auth/login",
            Method::Post,
            payload(json!({"username": "admin", "password": "secret"})),
            4,
        );
        assert_eq!(
            backend.handle(&good),
            Response::data(
                200,
                Payload::Token(TokenGrant {
                    token: "token_for_admin_4".to_string(),
                    expires_in: 3600,
                })
            )
        );

        let bad = Request::new(
            "/auth/login",
            Method::Post,
            payload(json!({"username": "admin", "password": "hunter2"})),
            5,
        );
        assert_eq!(backend.handle(&bad), Response::error(401, "Invalid credentials"));

        let empty = Request::new("/auth/login", Method::Post, None, 6);
        assert_eq!(backend.handle(&empty).status, 401);
    }

    #[test]
    fn test_unknown_endpoint() {
        let mut backend = SimulatedBackend::new();
        for (path, method) in [
            ("/orders", Method::Get),
            ("/users/1", Method::Get),
            ("/auth/login", Method::Get),
        ] {
            let response = backend.handle(&Request::new(path, method, None, 1));
            assert_eq!(response, Response::error(404, "Endpoint not found"));
        }
    }
}
