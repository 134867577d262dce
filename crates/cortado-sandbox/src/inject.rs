//! Sandbox injection.
//!
//! One entry point: hand in an [`AppDescriptor`] and optional seed data,
//! get back the descriptor with a sandbox-bound [`HostSdk`] attached. Host
//! code that launches mini-apps calls this in development mode and the
//! production composition root otherwise; the app itself never branches.

use std::sync::Arc;

use tracing::info;

use cortado_sdk::{AppDescriptor, HostSdk};

use crate::binding::{SandboxAdvisor, SandboxDataAccess, SandboxIdentity};
use crate::store::{MemoryStore, Seed};

/// A mini-app bound to a fresh sandbox.
///
/// Carries the descriptor it was created from, the ready-to-use SDK, and a
/// handle on the backing store for seeding checks and post-run inspection.
pub struct SandboxSession {
    /// The descriptor the session was created from.
    pub descriptor: AppDescriptor,

    /// Sandbox-bound capability facade.
    pub sdk: HostSdk,

    store: Arc<MemoryStore>,
}

impl SandboxSession {
    /// The in-memory store behind this session's SDK.
    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }
}

impl std::fmt::Debug for SandboxSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SandboxSession")
            .field("app_id", &self.descriptor.app_id)
            .finish_non_exhaustive()
    }
}

/// Bind a mini-app to a fresh sandbox.
///
/// Every call creates an isolated [`MemoryStore`] (seeded when `seed` is
/// given), so two sessions never share state. The returned session's `sdk`
/// is shaped exactly like the production one.
pub fn inject(descriptor: AppDescriptor, seed: Option<Seed>) -> SandboxSession {
    let store = Arc::new(match seed {
        Some(seed) => MemoryStore::from_seed(seed),
        None => MemoryStore::new(),
    });

    let sdk = HostSdk::new(
        Arc::new(SandboxIdentity),
        Arc::new(SandboxDataAccess::new(store.clone())),
        Arc::new(SandboxAdvisor),
    );

    info!(
        app_id = %descriptor.app_id,
        version = %descriptor.version,
        "sandbox attached"
    );

    SandboxSession {
        descriptor,
        sdk,
        store,
    }
}
