//! Capability contracts for cortado mini-apps.
//!
//! This crate defines the narrow surface a mini-app is allowed to touch:
//! three capability traits, the data model that crosses them, and the
//! [`HostSdk`] facade that bundles one implementation of each. Mini-apps
//! depend on this crate alone; the production binding (`cortado-host`) and
//! the sandbox binding (`cortado-sandbox`) implement it.
//!
//! # Trait Overview
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`Identity`] | Resolve who the calling human is |
//! | [`DataAccess`] | Mediated table reads and atomic batch writes |
//! | [`Advisor`] | One-shot, stateless AI consultation |
//!
//! # Substitution
//!
//! Whoever constructs the [`HostSdk`] picks the bindings; app code cannot
//! observe which one it got except through documented behavioral contracts
//! (for example, the sandbox always identifies an admin). Swapping the
//! environment is a construction-time decision, not an app-code change.

pub mod error;
pub mod facade;
pub mod manifest;
pub mod traits;
pub mod types;

// Re-export core types at crate root for convenience.
pub use error::{Result, SdkError};
pub use facade::HostSdk;
pub use manifest::AppDescriptor;
pub use traits::{Advisor, DataAccess, Identity};
pub use types::{
    AiResponse, AuditAction, AuditActor, AuditLogEntry, CommitOptions, CommitResult,
    CorrelationId, EmployeeProfile, Filter, Payload, QueryResult, Role,
};
