//! Backing-store abstraction.
//!
//! The production binding never talks to a concrete store directly; it goes
//! through [`TableStore`] so the data layer can be swapped (PostgREST in
//! deployment, a recording fake in tests) without touching commit or audit
//! logic.

use async_trait::async_trait;
use serde_json::Value;

use cortado_sdk::Filter;

use crate::error::Result;

/// Row-level access to named tables.
///
/// Implementations own the wire protocol and its failure modes. Callers
/// rely on two contracts: `select` returns matching rows in store order,
/// and `upsert` applies the whole batch in a single store call which either
/// fully succeeds or returns `Err`.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Read rows from `table` matching an equality filter.
    async fn select(&self, table: &str, filter: &Filter) -> Result<Vec<Value>>;

    /// Insert-or-update the batch in one call.
    async fn upsert(&self, table: &str, records: &[Value]) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct NullStore;

    #[async_trait]
    impl TableStore for NullStore {
        async fn select(&self, _table: &str, _filter: &Filter) -> Result<Vec<Value>> {
            Ok(Vec::new())
        }

        async fn upsert(&self, _table: &str, _records: &[Value]) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn store_is_object_safe() {
        let store: Arc<dyn TableStore> = Arc::new(NullStore);
        assert!(store.select("orders", &Filter::new()).await.unwrap().is_empty());
        assert!(store.upsert("orders", &[]).await.is_ok());
    }
}
