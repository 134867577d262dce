//! Audit trail sinks.
//!
//! Every mutation attempt produces an [`AuditLogEntry`] *before* the store
//! is touched. Where that entry goes is behind [`AuditSink`]: structured
//! logs ([`TracingSink`]), a store table ([`TableSink`]), or a capturing
//! fake in tests. Commit treats a sink failure as fatal, so an
//! implementation that cannot persist the entry blocks the write.

use async_trait::async_trait;
use tracing::info;

use cortado_sdk::AuditLogEntry;

use crate::error::Result;
use crate::store::TableStore;

/// Receives pre-mutation audit records.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Persist one audit entry.
    ///
    /// An `Err` here aborts the commit that produced the entry.
    async fn record(&self, entry: &AuditLogEntry) -> Result<()>;
}

/// An [`AuditSink`] that emits structured tracing events.
///
/// Infallible. Suitable for deployments where audit durability is handled
/// by the log pipeline.
#[derive(Debug, Default)]
pub struct TracingSink;

#[async_trait]
impl AuditSink for TracingSink {
    async fn record(&self, entry: &AuditLogEntry) -> Result<()> {
        info!(
            app_id = %entry.app_id,
            table = %entry.table,
            action = ?entry.action,
            records = entry.record_count,
            correlation_id = %entry.correlation_id,
            "audit"
        );
        Ok(())
    }
}

/// An [`AuditSink`] that upserts entries into a store table.
pub struct TableSink {
    store: std::sync::Arc<dyn TableStore>,
    table: String,
}

impl TableSink {
    /// Create a sink writing to `table` on the given store.
    pub fn new(store: std::sync::Arc<dyn TableStore>, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }
}

#[async_trait]
impl AuditSink for TableSink {
    async fn record(&self, entry: &AuditLogEntry) -> Result<()> {
        let row = serde_json::to_value(entry)?;
        self.store.upsert(&self.table, std::slice::from_ref(&row)).await
    }
}

impl std::fmt::Debug for TableSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableSink")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}
