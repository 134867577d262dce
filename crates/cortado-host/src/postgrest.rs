//! PostgREST-backed table store.
//!
//! [`PostgrestStore`] speaks the PostgREST dialect: equality filters become
//! `column=eq.value` query parameters, and upserts are a single `POST` with
//! `Prefer: resolution=merge-duplicates` so the whole batch is applied in
//! one store call.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use cortado_sdk::Filter;

use crate::config::StoreConfig;
use crate::error::{HostError, Result};
use crate::store::TableStore;

/// A [`TableStore`] that talks to a PostgREST endpoint.
///
/// Works against any PostgREST-compatible API (including Supabase) by
/// pointing `base_url` at the REST root.
pub struct PostgrestStore {
    config: StoreConfig,
    http: reqwest::Client,
    api_key: Option<String>,
}

impl PostgrestStore {
    /// Create a new store from configuration.
    ///
    /// The API key will be resolved from the environment variable specified
    /// in `config.api_key_env` at request time.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            api_key: None,
        }
    }

    /// Create a new store with an explicit API key.
    ///
    /// This bypasses environment variable lookup and uses the provided key
    /// directly.
    pub fn with_api_key(config: StoreConfig, api_key: String) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            api_key: Some(api_key),
        }
    }

    /// Returns the store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the REST URL for a table.
    fn table_url(&self, table: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        format!("{base}/{table}")
    }

    /// Resolve the API key: explicit key > environment variable.
    fn resolve_api_key(&self) -> Result<String> {
        if let Some(ref key) = self.api_key {
            return Ok(key.clone());
        }
        std::env::var(&self.config.api_key_env).map_err(|_| {
            HostError::NotConfigured(format!("set {} env var", self.config.api_key_env))
        })
    }
}

#[async_trait]
impl TableStore for PostgrestStore {
    async fn select(&self, table: &str, filter: &Filter) -> Result<Vec<Value>> {
        let api_key = self.resolve_api_key()?;
        let url = self.table_url(table);

        let mut params: Vec<(String, String)> = filter
            .iter()
            .map(|(field, value)| (field.to_string(), eq_param(value)))
            .collect();
        params.push(("select".into(), "*".into()));

        debug!(table = %table, conditions = filter.len(), "selecting rows");

        let response = self
            .http
            .get(&url)
            .query(&params)
            .header("apikey", &api_key)
            .header("Authorization", format!("Bearer {api_key}"))
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(HostError::AuthFailed(body));
            }
            let msg = extract_error_message(&body).unwrap_or(body);
            return Err(HostError::RequestFailed(format!("HTTP {status}: {msg}")));
        }

        let rows: Vec<Value> = response
            .json()
            .await
            .map_err(|e| HostError::InvalidResponse(format!("failed to parse rows: {e}")))?;

        debug!(table = %table, rows = rows.len(), "select complete");
        Ok(rows)
    }

    async fn upsert(&self, table: &str, records: &[Value]) -> Result<()> {
        let api_key = self.resolve_api_key()?;
        let url = self.table_url(table);

        debug!(table = %table, records = records.len(), "upserting batch");

        let response = self
            .http
            .post(&url)
            .header("apikey", &api_key)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(records)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(HostError::AuthFailed(body));
            }
            let msg = extract_error_message(&body).unwrap_or(body);
            return Err(HostError::Rejected(format!("HTTP {status}: {msg}")));
        }

        debug!(table = %table, "upsert complete");
        Ok(())
    }
}

/// Render a filter value as a PostgREST operator expression.
///
/// Strings go in raw (no JSON quoting); `null` uses the `is` operator,
/// since `eq.null` never matches a NULL column.
fn eq_param(value: &Value) -> String {
    match value {
        Value::Null => "is.null".to_string(),
        Value::String(s) => format!("eq.{s}"),
        other => format!("eq.{other}"),
    }
}

/// Extract a human-readable error message from a PostgREST error body.
///
/// PostgREST format: `{"message": "...", "code": "...", "details": ..., "hint": ...}`.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(String::from)
}

impl std::fmt::Debug for PostgrestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgrestStore")
            .field("base_url", &self.config.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}
