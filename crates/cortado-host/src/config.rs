//! Configuration schema for the production binding.
//!
//! Loaded from TOML. Every field has a default so a partial file (or an
//! empty one) still deserializes; secrets are never stored here, only the
//! names of the environment variables that hold them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HostError, Result};

// ── Root config ──────────────────────────────────────────────────────────

/// Root configuration for the production binding.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HostConfig {
    /// Backing store (PostgREST) settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// AI advisor endpoint settings.
    #[serde(default)]
    pub advisor: AdvisorConfig,

    /// Identity resolution settings.
    #[serde(default)]
    pub identity: IdentityConfig,
}

impl HostConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| HostError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }
}

// ── Store ────────────────────────────────────────────────────────────────

/// PostgREST store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the REST endpoint, e.g. `https://db.example.com/rest/v1`.
    #[serde(default = "default_store_base_url")]
    pub base_url: String,

    /// Environment variable holding the service API key.
    #[serde(default = "default_store_key_env")]
    pub api_key_env: String,

    /// Table holding employee profiles.
    #[serde(default = "default_employees_table")]
    pub employees_table: String,

    /// Table receiving audit records (empty = tracing only).
    #[serde(default = "default_audit_table")]
    pub audit_table: String,
}

fn default_store_base_url() -> String {
    "http://localhost:3000".into()
}
fn default_store_key_env() -> String {
    "CORTADO_STORE_KEY".into()
}
fn default_employees_table() -> String {
    "employees".into()
}
fn default_audit_table() -> String {
    "sdk_audit_logs".into()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_store_base_url(),
            api_key_env: default_store_key_env(),
            employees_table: default_employees_table(),
            audit_table: default_audit_table(),
        }
    }
}

// ── Advisor ──────────────────────────────────────────────────────────────

/// AI advisor endpoint settings (OpenAI-compatible chat completion API).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Base URL of the completion endpoint.
    #[serde(default = "default_advisor_base_url")]
    pub base_url: String,

    /// Environment variable holding the advisor API key.
    #[serde(default = "default_advisor_key_env")]
    pub api_key_env: String,

    /// Model identifier sent with every consultation.
    #[serde(default = "default_advisor_model")]
    pub model: String,
}

fn default_advisor_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_advisor_key_env() -> String {
    "CORTADO_ADVISOR_KEY".into()
}
fn default_advisor_model() -> String {
    "gpt-4o-mini".into()
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            base_url: default_advisor_base_url(),
            api_key_env: default_advisor_key_env(),
            model: default_advisor_model(),
        }
    }
}

// ── Identity ─────────────────────────────────────────────────────────────

/// Identity resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IdentityConfig {
    /// Employee whose profile `identify()` resolves (empty = unresolved).
    #[serde(default)]
    pub employee_id: String,
}
