//! Client Errors
//!
//! Exceptional outcomes of client calls. Expected negative results
//! (a rejected login, a user that is not cached) are plain values and
//! never show up here.

use thiserror::Error;

/// Errors raised by [`ResourceClient`](super::client::ResourceClient)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Input was rejected before any request was dispatched
    #[error("Validation error: {0}")]
    Validation(String),

    /// The backend answered with a non-success status
    #[error("API request failed: {status} - {message}")]
    Backend { status: u16, message: String },

    /// The backend answered with a success status but the wrong payload
    #[error("Unexpected response payload, expected {expected}")]
    UnexpectedPayload { expected: &'static str },
}

impl ClientError {
    /// Status code carried by a backend error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
