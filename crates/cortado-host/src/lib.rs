//! Production capability binding for cortado.
//!
//! Implements the `cortado-sdk` contracts against real infrastructure: a
//! PostgREST table store, an OpenAI-compatible advisor endpoint, and an
//! audit trail that is written *before* every mutation attempt.
//!
//! # Bindings
//!
//! | Contract | Implementation |
//! |----------|----------------|
//! | `Identity` | [`HostIdentity`], fresh store lookup per call |
//! | `DataAccess` | [`HostDataAccess`], audited single-upsert commits |
//! | `Advisor` | [`HostAdvisor`], chat-completion proxy |
//!
//! # Composition
//!
//! [`HostBinding`] is the composition root: it turns a [`HostConfig`] into
//! a ready [`HostSdk`], defaulting to the PostgREST store and a table-backed
//! audit sink, with injection points for tests and alternative deployments.
//!
//! ```rust,ignore
//! use cortado_host::{HostBinding, HostConfig};
//!
//! let config = HostConfig::load("cortado.toml")?;
//! let sdk = HostBinding::from_config(config).into_sdk();
//! let who = sdk.auth.identify().await?;
//! ```

pub mod advisor;
pub mod audit;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod postgrest;
pub mod rollback;
pub mod store;

// Re-export core types at crate root for convenience.
pub use advisor::HostAdvisor;
pub use audit::{AuditSink, TableSink, TracingSink};
pub use auth::HostIdentity;
pub use config::{AdvisorConfig, HostConfig, IdentityConfig, StoreConfig};
pub use db::HostDataAccess;
pub use error::{HostError, Result};
pub use postgrest::PostgrestStore;
pub use rollback::{RollbackEntry, RollbackRegistry};
pub use store::TableStore;

use std::sync::Arc;

use cortado_sdk::HostSdk;

/// Composition root for the production binding.
///
/// Holds the configuration plus optional overrides, and assembles the
/// facade once with [`into_sdk`](HostBinding::into_sdk). Overrides exist so
/// tests (and deployments with their own store) can swap infrastructure
/// without touching the commit and audit logic.
pub struct HostBinding {
    config: HostConfig,
    store: Option<Arc<dyn TableStore>>,
    audit: Option<Arc<dyn AuditSink>>,
    rollback: Arc<RollbackRegistry>,
}

impl HostBinding {
    /// Start a binding from configuration.
    pub fn from_config(config: HostConfig) -> Self {
        Self {
            config,
            store: None,
            audit: None,
            rollback: Arc::new(RollbackRegistry::new()),
        }
    }

    /// Replace the default PostgREST store.
    pub fn with_store(mut self, store: Arc<dyn TableStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the default audit sink.
    pub fn with_audit_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(sink);
        self
    }

    /// The rollback registry the assembled binding will register commits in.
    ///
    /// Grab a clone before calling [`into_sdk`](HostBinding::into_sdk) to
    /// claim tokens later.
    pub fn rollback(&self) -> Arc<RollbackRegistry> {
        self.rollback.clone()
    }

    /// Assemble the facade.
    ///
    /// Defaults: a [`PostgrestStore`] over `config.store`, and a
    /// [`TableSink`] writing to `config.store.audit_table` (or a
    /// [`TracingSink`] when that table name is empty). The identity binding
    /// doubles as the audit actor source.
    pub fn into_sdk(self) -> HostSdk {
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(PostgrestStore::new(self.config.store.clone())));

        let audit = self.audit.unwrap_or_else(|| {
            if self.config.store.audit_table.is_empty() {
                Arc::new(TracingSink) as Arc<dyn AuditSink>
            } else {
                Arc::new(TableSink::new(
                    store.clone(),
                    self.config.store.audit_table.clone(),
                ))
            }
        });

        let identity = Arc::new(HostIdentity::new(
            store.clone(),
            self.config.store.employees_table.clone(),
            self.config.identity.clone(),
        ));

        let db = HostDataAccess::new(store, audit, self.rollback)
            .with_actor_source(identity.clone());

        let ai = HostAdvisor::new(self.config.advisor.clone());

        HostSdk::new(identity, Arc::new(db), Arc::new(ai))
    }
}

impl std::fmt::Debug for HostBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostBinding")
            .field("store_override", &self.store.is_some())
            .field("audit_override", &self.audit.is_some())
            .finish_non_exhaustive()
    }
}
