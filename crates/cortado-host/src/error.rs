//! Error types for the production binding.
//!
//! Store and audit operations return [`Result<T>`] which uses [`HostError`]
//! as the error type. Note that the capability surface itself never exposes
//! these: `query` and `commit` convert failures into inline result fields
//! before they reach a mini-app.

use thiserror::Error;

/// Errors that can occur inside the production binding.
#[derive(Error, Debug)]
pub enum HostError {
    /// The HTTP request to the store failed.
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// Authentication with the store was rejected (HTTP 401/403).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The store refused the write (constraint violation, bad payload).
    #[error("write rejected: {0}")]
    Rejected(String),

    /// The binding has not been configured (e.g. missing API key).
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// The store returned a response that could not be parsed.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The configuration file could not be read.
    #[error("config error: {0}")]
    Config(String),

    /// An HTTP-level error from reqwest.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// A JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A TOML parse error.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A convenience type alias for binding-internal operations.
pub type Result<T> = std::result::Result<T, HostError>;
