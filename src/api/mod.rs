//! API interaction module
//!
//! This module provides the client side of the user-resource API: request
//! and response types, the backend seam, sessions and the client itself.
//!
//! # Module Structure
//!
//! - [`auth`] - Session tokens and expiry
//! - [`backend`] - The [`Backend`](backend::Backend) trait and the simulated table
//! - [`client`] - Main client for making API requests
//! - [`error`] - Client error types
//! - [`http`] - Request/response types and endpoint routing
//! - [`user`] - The user record and email checks
//!
//! # Example
//!
//! ```
//! use usercache::api::client::{ClientConfig, ResourceClient};
//!
//! let mut client = ResourceClient::simulated(ClientConfig::new("https://api.example.com"));
//! assert!(client.login("admin", "secret"));
//! let users = client.list_users().unwrap();
//! assert_eq!(users.len(), 3);
//! ```

pub mod auth;
pub mod backend;
pub mod client;
pub mod error;
pub mod http;
pub mod user;

pub use backend::{Backend, SimulatedBackend};
pub use client::{ClientConfig, ClientStats, ResourceClient};
pub use error::ClientError;
pub use user::User;
