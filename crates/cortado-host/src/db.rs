//! Audited data access over a backing store.
//!
//! [`HostDataAccess`] is where the write-path guarantees live. Every commit
//! walks one fixed sequence: mint a correlation identifier, record the
//! audit entry, then issue a single upsert carrying the whole batch. The
//! audit record goes first so a failed write is still traceable, and the
//! one-call upsert is the atomicity boundary: the store accepts or rejects
//! the batch as a unit, never a subset.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use cortado_sdk::{
    AuditActor, AuditLogEntry, CommitOptions, CommitResult, CorrelationId, DataAccess, Filter,
    Identity, Payload, QueryResult,
};

use crate::audit::AuditSink;
use crate::rollback::{RollbackEntry, RollbackRegistry};
use crate::store::TableStore;

/// The production [`DataAccess`] binding.
pub struct HostDataAccess {
    store: Arc<dyn TableStore>,
    audit: Arc<dyn AuditSink>,
    rollback: Arc<RollbackRegistry>,
    actor_source: Option<Arc<dyn Identity>>,
}

impl HostDataAccess {
    /// Create a binding over a store, an audit sink, and a rollback registry.
    pub fn new(
        store: Arc<dyn TableStore>,
        audit: Arc<dyn AuditSink>,
        rollback: Arc<RollbackRegistry>,
    ) -> Self {
        Self {
            store,
            audit,
            rollback,
            actor_source: None,
        }
    }

    /// Attach an identity source used to stamp audit entries with the
    /// acting employee. Resolution failures leave the actor unset; they
    /// never block a commit.
    pub fn with_actor_source(mut self, identity: Arc<dyn Identity>) -> Self {
        self.actor_source = Some(identity);
        self
    }

    async fn resolve_actor(&self) -> Option<AuditActor> {
        let source = self.actor_source.as_ref()?;
        match source.identify().await {
            Ok(profile) => Some(AuditActor::from(&profile)),
            Err(e) => {
                debug!(error = %e, "actor unresolved for audit entry");
                None
            }
        }
    }
}

#[async_trait]
impl DataAccess for HostDataAccess {
    async fn query(&self, table: &str, filter: &Filter) -> QueryResult {
        let correlation_id = CorrelationId::mint();

        debug!(
            table = %table,
            conditions = filter.len(),
            correlation_id = %correlation_id,
            "query"
        );

        match self.store.select(table, filter).await {
            Ok(rows) => QueryResult::ok(rows, correlation_id),
            Err(e) => {
                warn!(
                    table = %table,
                    correlation_id = %correlation_id,
                    error = %e,
                    "query failed"
                );
                // Store errors pass through untouched as the inline error.
                QueryResult::err(e.to_string(), correlation_id)
            }
        }
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

        warn!(
            app_id = %options.app_id,
            table = %table,
            records = records.len(),
            correlation_id = %correlation_id,
            "write operation requested"
        );

        let mut entry = AuditLogEntry::upsert(
            options.app_id.clone(),
            table,
            &records,
            correlation_id.clone(),
        );
        if let Some(actor) = self.resolve_actor().await {
            entry = entry.with_actor(actor);
        }
        let record_ids = entry.record_ids().to_vec();

        // Audit first. If the trail cannot be written, the write is not
        // attempted at all.
        if let Err(e) = self.audit.record(&entry).await {
            error!(
                correlation_id = %correlation_id,
                error = %e,
                "audit sink failed, commit aborted"
            );
            return CommitResult::failed(correlation_id, timestamp);
        }

        // One upsert for the whole batch.
        match self.store.upsert(table, &records).await {
            Ok(()) => {
                let token = correlation_id.to_string();
                self.rollback.register(RollbackEntry {
                    token: token.clone(),
                    correlation_id: correlation_id.clone(),
                    table: table.to_string(),
                    app_id: options.app_id.clone(),
                    record_ids,
                    recorded_at: timestamp.clone(),
                });
                info!(
                    table = %table,
                    records = entry.record_count,
                    correlation_id = %correlation_id,
                    "commit applied"
                );
                CommitResult::committed(correlation_id, timestamp, token)
            }
            Err(e) => {
                warn!(
                    table = %table,
                    correlation_id = %correlation_id,
                    error = %e,
                    "commit rejected by store"
                );
                CommitResult::failed(correlation_id, timestamp)
            }
        }
    }
}

impl std::fmt::Debug for HostDataAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostDataAccess")
            .field("actor_source", &self.actor_source.is_some())
            .finish_non_exhaustive()
    }
}
