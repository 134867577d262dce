//! Sandbox capability implementations.
//!
//! Behavioral substitutes for the production binding, not simulations of
//! it: identity always resolves to an unrestricted admin, commits always
//! succeed, and the advisor answers from a canned template. The sandbox
//! exists for rapid mini-app development, which means permission-denied and
//! write-failure paths cannot be exercised here, only against the
//! production binding with a scripted store.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use cortado_sdk::{
    Advisor, AiResponse, CommitOptions, CommitResult, CorrelationId, DataAccess, EmployeeProfile,
    Filter, Identity, Payload, QueryResult, Role,
};

use crate::store::MemoryStore;

/// Fixed identifier of the sandbox user.
pub const DEV_USER_ID: &str = "dev-user";
/// Fixed tenant of the sandbox user.
pub const DEV_BUSINESS_ID: &str = "dev-business";

/// An [`Identity`] that always resolves an unrestricted admin profile.
#[derive(Debug, Default)]
pub struct SandboxIdentity;

#[async_trait]
impl Identity for SandboxIdentity {
    async fn identify(&self) -> cortado_sdk::Result<EmployeeProfile> {
        Ok(EmployeeProfile {
            id: DEV_USER_ID.into(),
            name: "Developer Mode User".into(),
            role: Role::Admin,
            business_id: DEV_BUSINESS_ID.into(),
            permissions: vec!["*".into()],
        })
    }
}

/// A [`DataAccess`] over an in-memory [`MemoryStore`].
///
/// Reads share the production filter semantics. Writes merge-or-append by
/// `id` and always report success; the sandbox never simulates a store
/// rejection.
pub struct SandboxDataAccess {
    store: Arc<MemoryStore>,
}

impl SandboxDataAccess {
    /// Create a binding over the given store.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DataAccess for SandboxDataAccess {
    async fn query(&self, table: &str, filter: &Filter) -> QueryResult {
        let correlation_id = CorrelationId::mint();
        debug!(
            table = %table,
            conditions = filter.len(),
            correlation_id = %correlation_id,
            "sandbox query"
        );
        QueryResult::ok(self.store.select(table, filter), correlation_id)
    }

    async fn commit(
        &self,
        table: &str,
        payload: Payload,
        options: &CommitOptions,
    ) -> CommitResult {
        let correlation_id = CorrelationId::mint();
        let timestamp = chrono::Utc::now().to_rfc3339();
        let records = payload.into_records();

        debug!(
            app_id = %options.app_id,
            table = %table,
            records = records.len(),
            correlation_id = %correlation_id,
            "sandbox write"
        );

        self.store.merge(table, &records);

        let token = correlation_id.to_string();
        CommitResult::committed(correlation_id, timestamp, token)
    }
}

impl std::fmt::Debug for SandboxDataAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SandboxDataAccess").finish_non_exhaustive()
    }
}

/// An [`Advisor`] that answers from a canned template.
///
/// Deterministic and free: the reply echoes the prompt, the suggestion
/// list is fixed, and `tokens_used` is always zero. Context is accepted
/// and ignored.
#[derive(Debug, Default)]
pub struct SandboxAdvisor;

#[async_trait]
impl Advisor for SandboxAdvisor {
    async fn consult(
        &self,
        prompt: &str,
        _context: Option<&Value>,
    ) -> cortado_sdk::Result<AiResponse> {
        Ok(AiResponse {
            content: format!("[sandbox] response to: {prompt}"),
            suggestions: vec!["Suggestion A".into(), "Suggestion B".into()],
            tokens_used: 0,
        })
    }
}
