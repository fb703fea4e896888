//! Typed client and cache for a user-resource API.
//!
//! - [`api`] routes requests to a [`Backend`](api::Backend), validates input
//!   and tracks the session.
//! - [`resource`] caches users on top of the client and computes summaries.
//! - [`config`] and [`output`] support the `usercache` binary.

pub mod api;
pub mod config;
pub mod output;
pub mod resource;
