//! SDK error types.
//!
//! Defines [`SdkError`], the error type surfaced to mini-app code through
//! the fallible capability calls (`identify`, `consult`). The data-access
//! surface does not use it: `query` reports failures inline on
//! [`QueryResult`](crate::types::QueryResult) and `commit` reports them via
//! the `success` flag on [`CommitResult`](crate::types::CommitResult).

use thiserror::Error;

/// Errors surfaced to mini-apps by the fallible capability calls.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SdkError {
    /// The caller's identity could not be resolved.
    #[error("identity unresolved: {0}")]
    Identity(String),

    /// The AI consultation backend failed or is unreachable.
    #[error("advisor unavailable: {0}")]
    Advisor(String),

    /// A record could not be serialized into a storable row.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenience alias for SDK operations.
pub type Result<T> = std::result::Result<T, SdkError>;
