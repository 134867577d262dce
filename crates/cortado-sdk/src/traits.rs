//! Capability contracts between mini-apps and the host.
//!
//! A mini-app programs against these three traits and nothing else. Which
//! implementation sits behind them (the production binding or the sandbox)
//! is decided by whoever constructs the [`HostSdk`](crate::facade::HostSdk),
//! never by the app. All traits are object-safe and `Send + Sync` so they
//! can be shared as `Arc<dyn Trait>` across tasks.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::types::{
    AiResponse, CommitOptions, CommitResult, EmployeeProfile, Filter, Payload, QueryResult,
};

/// Resolves the identity of the calling human.
#[async_trait]
pub trait Identity: Send + Sync {
    /// Return a fresh profile for the current caller.
    ///
    /// Implementations must not cache across calls; each invocation
    /// re-resolves the profile.
    async fn identify(&self) -> Result<EmployeeProfile>;
}

/// Mediated read and write access to named tables.
#[async_trait]
pub trait DataAccess: Send + Sync {
    /// Read records from `table` matching an equality [`Filter`].
    ///
    /// Never fails at the call level: any store failure is reported inline
    /// via [`QueryResult::error`] with an empty data list.
    async fn query(&self, table: &str, filter: &Filter) -> QueryResult;

    /// Write one record or a batch to `table` as a single atomic upsert.
    ///
    /// The whole batch succeeds or fails together; implementations must not
    /// split it into per-record writes. The outcome is reported via
    /// [`CommitResult::success`], never as a call-level error.
    async fn commit(&self, table: &str, payload: Payload, options: &CommitOptions)
        -> CommitResult;
}

/// One-shot AI consultation.
#[async_trait]
pub trait Advisor: Send + Sync {
    /// Send a prompt, with optional freeform context, and return the reply.
    ///
    /// Stateless: no conversation history is kept between calls. The only
    /// cost signal is [`AiResponse::tokens_used`].
    async fn consult(&self, prompt: &str, context: Option<&Value>) -> Result<AiResponse>;
}
