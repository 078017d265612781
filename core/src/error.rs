//! Error types for the cats API client.
//!
//! # Design
//! Every non-2xx response collapses into `Remote`, whose `Display` is the
//! server-supplied message verbatim. Not-found, validation and server errors
//! are not told apart here; `status` is kept for callers that care.

use thiserror::Error;

/// Result alias used across the client.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by `CatsClient` and `CatsService`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// A single cat was expected but the server returned an empty collection.
    #[error("expected a cat, got an empty collection")]
    EmptyCollection,

    /// `update` was given a cat that has no server-assigned id.
    #[error("cat has no id; create it first")]
    NotPersisted,
}

impl ApiError {
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    /// Status code of a remote failure, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}
