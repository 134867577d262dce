//! The single object handed to a mini-app.

use std::sync::Arc;

use crate::traits::{Advisor, DataAccess, Identity};

/// Entry point for mini-app code.
///
/// Groups the three capabilities behind one handle. Apps receive a fully
/// constructed `HostSdk` and use its fields directly; they never pick or
/// build an implementation themselves. Cloning is cheap and shares the
/// underlying bindings.
#[derive(Clone)]
pub struct HostSdk {
    /// Identity resolution.
    pub auth: Arc<dyn Identity>,

    /// Table reads and writes.
    pub db: Arc<dyn DataAccess>,

    /// AI consultation.
    pub ai: Arc<dyn Advisor>,
}

impl HostSdk {
    /// Assemble a facade from capability implementations.
    pub fn new(auth: Arc<dyn Identity>, db: Arc<dyn DataAccess>, ai: Arc<dyn Advisor>) -> Self {
        Self { auth, db, ai }
    }
}

impl std::fmt::Debug for HostSdk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostSdk").finish_non_exhaustive()
    }
}
