//! Data model for the capability surface.
//!
//! Everything a mini-app sends or receives crosses this module: identity
//! profiles, query/commit results, write options, audit records, and AI
//! responses. Records are schemaless [`serde_json::Value`] rows; the host
//! platform owns the table schemas, not this layer. Typed access is opt-in
//! via [`QueryResult::rows_as`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{Result, SdkError};

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Employee role within one business (tenant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full control over the business.
    Admin,
    /// Shift and staff management.
    Manager,
    /// Bar / kitchen operations.
    Barista,
    /// General staff.
    Staff,
}

/// Identity of the calling human, as seen by a mini-app.
///
/// Produced fresh on every `identify()` call. This layer never caches,
/// mutates, or persists profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Employee identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Role within the business.
    pub role: Role,

    /// Tenant identifier. Tenant isolation is enforced by the backing
    /// store, not by this layer.
    pub business_id: String,

    /// Capability strings granted to this employee. `"*"` grants all.
    pub permissions: Vec<String>,
}

impl EmployeeProfile {
    /// Check whether the profile carries a capability, honoring the `"*"`
    /// wildcard.
    pub fn has_permission(&self, capability: &str) -> bool {
        self.permissions
            .iter()
            .any(|p| p == "*" || p == capability)
    }
}

// ---------------------------------------------------------------------------
// Correlation
// ---------------------------------------------------------------------------

/// Opaque per-call identifier threading a request through logs, results,
/// and (for commits) the rollback handle.
///
/// Minted once at the start of every capability call; unique within a
/// process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    /// Mint a fresh correlation identifier.
    pub fn mint() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// A flat field/value equality filter.
///
/// Equality only: no ranges, no joins, no ordering contract. A record
/// matches when **all** entries compare equal (logical AND). Field order is
/// preserved so bindings that translate filters to a wire format produce
/// stable output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filter(Vec<(String, Value)>);

impl Filter {
    /// Create an empty filter (matches every record).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality condition.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.push((field.into(), value.into()));
        self
    }

    /// Whether the filter has no conditions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of conditions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(field, value)` conditions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Test a record against the filter: strict per-field equality,
    /// AND across fields. Non-object records only match an empty filter.
    pub fn matches(&self, record: &Value) -> bool {
        self.0
            .iter()
            .all(|(field, value)| record.get(field) == Some(value))
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Outcome of a read.
///
/// `query` never fails at the call level: all failures surface as
/// [`QueryResult::error`] with an empty `data` list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    /// Matching records, in store order.
    pub data: Vec<Value>,

    /// Inline failure description, `None` on success.
    pub error: Option<String>,

    /// Identifier minted for this call.
    pub correlation_id: CorrelationId,
}

impl QueryResult {
    /// Construct a successful result.
    pub fn ok(data: Vec<Value>, correlation_id: CorrelationId) -> Self {
        Self {
            data,
            error: None,
            correlation_id,
        }
    }

    /// Construct a failed result with an empty data list.
    pub fn err(message: impl Into<String>, correlation_id: CorrelationId) -> Self {
        Self {
            data: Vec::new(),
            error: Some(message.into()),
            correlation_id,
        }
    }

    /// Whether the read succeeded.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Deserialize the rows into a typed list.
    ///
    /// This is the typed view over the schemaless rows; it replaces a
    /// generic type parameter on `query` so the capability trait stays
    /// object-safe.
    pub fn rows_as<T: serde::de::DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.data
            .iter()
            .map(|row| serde_json::from_value(row.clone()).map_err(SdkError::from))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Commit
// ---------------------------------------------------------------------------

/// Caller-supplied write metadata. `app_id` is mandatory and identifies the
/// mini-app for audit purposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitOptions {
    /// Identity of the mini-app issuing the write.
    pub app_id: String,

    /// Optional human-readable reason for the write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Ask the binding to skip any read-side caching it maintains.
    #[serde(default)]
    pub bypass_cache: bool,
}

impl CommitOptions {
    /// Create options for the given mini-app.
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            reason: None,
            bypass_cache: false,
        }
    }

    /// Attach a reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Outcome of a write.
///
/// Invariant: `rollback_token` is empty if and only if `success` is false.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitResult {
    /// Whether the whole batch was accepted by the store.
    pub success: bool,

    /// Identifier minted for this call.
    pub correlation_id: CorrelationId,

    /// RFC 3339 timestamp taken when the commit was requested.
    pub timestamp: String,

    /// Handle for a future compensating action. A handle only: nothing in
    /// this layer executes a rollback.
    pub rollback_token: String,
}

impl CommitResult {
    /// Construct a successful result carrying a non-empty rollback handle.
    pub fn committed(
        correlation_id: CorrelationId,
        timestamp: impl Into<String>,
        rollback_token: impl Into<String>,
    ) -> Self {
        Self {
            success: true,
            correlation_id,
            timestamp: timestamp.into(),
            rollback_token: rollback_token.into(),
        }
    }

    /// Construct a failed result with an empty rollback handle.
    pub fn failed(correlation_id: CorrelationId, timestamp: impl Into<String>) -> Self {
        Self {
            success: false,
            correlation_id,
            timestamp: timestamp.into(),
            rollback_token: String::new(),
        }
    }
}

/// One record or a batch of records for `commit`.
///
/// Bindings normalize either shape to a records array before writing; a
/// single record becomes a one-element batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    /// A single record.
    One(Value),
    /// A batch of records, written as one atomic call.
    Many(Vec<Value>),
}

impl Payload {
    /// Build a payload from any serializable record.
    pub fn record<T: Serialize>(record: &T) -> Result<Self> {
        Ok(Self::One(serde_json::to_value(record)?))
    }

    /// Build a batch payload from serializable records.
    pub fn records<T: Serialize>(records: &[T]) -> Result<Self> {
        records
            .iter()
            .map(|r| serde_json::to_value(r).map_err(SdkError::from))
            .collect::<Result<Vec<_>>>()
            .map(Self::Many)
    }

    /// Number of records carried.
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(records) => records.len(),
        }
    }

    /// Whether the payload carries no records.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Many(records) if records.is_empty())
    }

    /// Normalize to a records array. A single record is wrapped.
    pub fn into_records(self) -> Vec<Value> {
        match self {
            Self::One(record) => vec![record],
            Self::Many(records) => records,
        }
    }
}

impl From<Value> for Payload {
    fn from(record: Value) -> Self {
        Self::One(record)
    }
}

impl From<Vec<Value>> for Payload {
    fn from(records: Vec<Value>) -> Self {
        Self::Many(records)
    }
}

// ---------------------------------------------------------------------------
// Audit
// ---------------------------------------------------------------------------

/// Kind of mutation recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum AuditAction {
    /// Insert-or-update of a whole batch in one store call.
    Upsert,
}

/// The human on whose behalf a mini-app acted, if known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditActor {
    /// Employee identifier.
    pub employee_id: String,
    /// Role at the time of the action.
    pub role: Role,
    /// Tenant identifier.
    pub business_id: String,
}

impl From<&EmployeeProfile> for AuditActor {
    fn from(profile: &EmployeeProfile) -> Self {
        Self {
            employee_id: profile.id.clone(),
            role: profile.role,
            business_id: profile.business_id.clone(),
        }
    }
}

/// Pre-mutation record of intent.
///
/// Written *before* the mutation is attempted; it must exist even when the
/// subsequent write fails, so "who tried to do what" is always recoverable
/// independent of "did it succeed". Carries a summary of the payload (record
/// ids and count), never the full payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Mini-app that requested the write.
    pub app_id: String,

    /// Target table.
    pub table: String,

    /// Kind of mutation.
    pub action: AuditAction,

    /// Number of records in the batch.
    pub record_count: usize,

    /// Summary of the payload: the `id` field of each record
    /// (`null` where absent).
    pub payload_summary: Value,

    /// Identifier threading this write through logs and results.
    pub correlation_id: CorrelationId,

    /// The acting employee, when the binding resolved one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<AuditActor>,

    /// RFC 3339 timestamp.
    pub timestamp: String,
}

impl AuditLogEntry {
    /// Create an upsert audit entry for a normalized records array.
    pub fn upsert(
        app_id: impl Into<String>,
        table: impl Into<String>,
        records: &[Value],
        correlation_id: CorrelationId,
    ) -> Self {
        let ids: Vec<Value> = records
            .iter()
            .map(|r| r.get("id").cloned().unwrap_or(Value::Null))
            .collect();
        Self {
            app_id: app_id.into(),
            table: table.into(),
            action: AuditAction::Upsert,
            record_count: records.len(),
            payload_summary: Value::Array(ids),
            correlation_id,
            actor: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Attach the acting employee.
    pub fn with_actor(mut self, actor: AuditActor) -> Self {
        self.actor = Some(actor);
        self
    }

    /// The record ids captured in the payload summary.
    pub fn record_ids(&self) -> &[Value] {
        match &self.payload_summary {
            Value::Array(ids) => ids,
            _ => &[],
        }
    }
}

// ---------------------------------------------------------------------------
// AI consultation
// ---------------------------------------------------------------------------

/// Result of an AI consultation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiResponse {
    /// The main reply.
    pub content: String,

    /// Alternative or follow-up suggestions, possibly empty.
    #[serde(default)]
    pub suggestions: Vec<String>,

    /// Tokens consumed by the call; the only cost signal this layer offers.
    #[serde(default)]
    pub tokens_used: u32,
}
