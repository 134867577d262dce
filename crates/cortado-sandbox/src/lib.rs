//! Ephemeral sandbox binding for cortado mini-apps.
//!
//! Implements the `cortado-sdk` contracts against an in-memory store so a
//! mini-app can be developed and demonstrated with zero infrastructure.
//! The substitution is logical, not an isolation boundary: sandboxed code
//! runs in-process with the host and is simply handed different bindings.
//!
//! # Bindings
//!
//! | Contract | Implementation |
//! |----------|----------------|
//! | `Identity` | [`SandboxIdentity`], always an unrestricted admin |
//! | `DataAccess` | [`SandboxDataAccess`], merge-by-id writes that always succeed |
//! | `Advisor` | [`SandboxAdvisor`], canned zero-cost replies |
//!
//! # Entry point
//!
//! ```rust,ignore
//! use cortado_sandbox::{fixtures, inject};
//! use cortado_sdk::AppDescriptor;
//!
//! let session = inject(
//!     AppDescriptor::new("kds-zero-g", "Kitchen Display"),
//!     Some(fixtures::demo_cafe()),
//! );
//! let orders = session.sdk.db.query("orders", &Default::default()).await;
//! ```
//!
//! Because commits always succeed and `identify()` always grants `"*"`,
//! permission-denied and write-failure paths are not testable here; the
//! production binding with a scripted store covers those.

pub mod binding;
pub mod fixtures;
pub mod inject;
pub mod store;

// Re-export core types at crate root for convenience.
pub use binding::{SandboxAdvisor, SandboxDataAccess, SandboxIdentity};
pub use binding::{DEV_BUSINESS_ID, DEV_USER_ID};
pub use inject::{inject, SandboxSession};
pub use store::{ids_match, MemoryStore, Seed};
