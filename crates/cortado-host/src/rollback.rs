//! Rollback handle registry.
//!
//! A successful commit leaves behind a [`RollbackEntry`] keyed by its
//! rollback token. The registry records *what could be undone*: which
//! records, in which table, written by which app and when. It deliberately
//! stops there. No compensation executor lives in this layer, and claiming
//! a token only hands the recorded context to whoever implements the undo.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde_json::Value;

use cortado_sdk::CorrelationId;

/// Context captured for one committed batch.
#[derive(Debug, Clone)]
pub struct RollbackEntry {
    /// The rollback token handed to the caller.
    pub token: String,

    /// Correlation identifier of the commit.
    pub correlation_id: CorrelationId,

    /// Table the batch was written to.
    pub table: String,

    /// Mini-app that issued the write.
    pub app_id: String,

    /// `id` fields of the written records (`null` where absent).
    pub record_ids: Vec<Value>,

    /// RFC 3339 timestamp of the commit.
    pub recorded_at: String,
}

/// In-process registry of claimable rollback handles.
#[derive(Debug, Default)]
pub struct RollbackRegistry {
    entries: Mutex<HashMap<String, RollbackEntry>>,
}

impl RollbackRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a committed batch under its token.
    pub fn register(&self, entry: RollbackEntry) {
        self.entries.lock().insert(entry.token.clone(), entry);
    }

    /// Take the entry for a token. Tokens are single-use: a second claim
    /// of the same token returns `None`.
    pub fn claim(&self, token: &str) -> Option<RollbackEntry> {
        self.entries.lock().remove(token)
    }

    /// Look at the entry for a token without consuming it.
    pub fn peek(&self, token: &str) -> Option<RollbackEntry> {
        self.entries.lock().get(token).cloned()
    }

    /// Number of unclaimed handles.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether no handles are outstanding.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(token: &str) -> RollbackEntry {
        let correlation_id = CorrelationId::mint();
        RollbackEntry {
            token: token.into(),
            correlation_id,
            table: "orders".into(),
            app_id: "kds-zero-g".into(),
            record_ids: vec![json!(1), json!(2)],
            recorded_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    #[test]
    fn claim_is_single_use() {
        let registry = RollbackRegistry::new();
        registry.register(entry("tok-1"));
        assert_eq!(registry.len(), 1);

        let claimed = registry.claim("tok-1").unwrap();
        assert_eq!(claimed.table, "orders");
        assert_eq!(claimed.record_ids.len(), 2);

        assert!(registry.claim("tok-1").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn peek_does_not_consume() {
        let registry = RollbackRegistry::new();
        registry.register(entry("tok-2"));
        assert!(registry.peek("tok-2").is_some());
        assert!(registry.peek("tok-2").is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unknown_token_yields_nothing() {
        let registry = RollbackRegistry::new();
        assert!(registry.claim("missing").is_none());
        assert!(registry.peek("missing").is_none());
    }
}
