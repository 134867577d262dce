//! Production identity resolution.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use cortado_sdk::{EmployeeProfile, Filter, Identity, SdkError};

use crate::config::IdentityConfig;
use crate::store::TableStore;

/// An [`Identity`] that resolves the configured employee from the store.
///
/// Every `identify()` call performs a fresh lookup against the employees
/// table; nothing is cached between calls, so role or permission changes
/// take effect immediately.
pub struct HostIdentity {
    store: Arc<dyn TableStore>,
    employees_table: String,
    config: IdentityConfig,
}

impl HostIdentity {
    /// Create a resolver over the given store.
    pub fn new(
        store: Arc<dyn TableStore>,
        employees_table: impl Into<String>,
        config: IdentityConfig,
    ) -> Self {
        Self {
            store,
            employees_table: employees_table.into(),
            config,
        }
    }
}

#[async_trait]
impl Identity for HostIdentity {
    async fn identify(&self) -> cortado_sdk::Result<EmployeeProfile> {
        let employee_id = self.config.employee_id.as_str();
        if employee_id.is_empty() {
            return Err(SdkError::Identity("no employee configured".into()));
        }

        debug!(employee_id = %employee_id, "resolving identity");

        let filter = Filter::new().eq("id", employee_id);
        let rows = self
            .store
            .select(&self.employees_table, &filter)
            .await
            .map_err(|e| SdkError::Identity(e.to_string()))?;

        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| SdkError::Identity(format!("employee '{employee_id}' not found")))?;

        serde_json::from_value(row)
            .map_err(|e| SdkError::Identity(format!("malformed profile for '{employee_id}': {e}")))
    }
}

impl std::fmt::Debug for HostIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostIdentity")
            .field("employees_table", &self.employees_table)
            .field("employee_id", &self.config.employee_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{HostError, Result};
    use cortado_sdk::Role;
    use parking_lot::Mutex;
    use serde_json::{json, Value};

    struct FixtureStore {
        rows: Vec<Value>,
        fail: bool,
        selects: Mutex<usize>,
    }

    impl FixtureStore {
        fn with_rows(rows: Vec<Value>) -> Self {
            Self {
                rows,
                fail: false,
                selects: Mutex::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                rows: Vec::new(),
                fail: true,
                selects: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl TableStore for FixtureStore {
        async fn select(&self, _table: &str, filter: &Filter) -> Result<Vec<Value>> {
            *self.selects.lock() += 1;
            if self.fail {
                return Err(HostError::RequestFailed("store offline".into()));
            }
            Ok(self
                .rows
                .iter()
                .filter(|row| filter.matches(row))
                .cloned()
                .collect())
        }

        async fn upsert(&self, _table: &str, _records: &[Value]) -> Result<()> {
            Ok(())
        }
    }

    fn config(employee_id: &str) -> IdentityConfig {
        IdentityConfig {
            employee_id: employee_id.into(),
        }
    }

    fn employee_row() -> Value {
        json!({
            "id": "emp-42",
            "name": "Dana",
            "role": "manager",
            "business_id": "biz-9",
            "permissions": ["orders.read", "orders.write"]
        })
    }

    #[tokio::test]
    async fn resolves_configured_employee() {
        let store = Arc::new(FixtureStore::with_rows(vec![employee_row()]));
        let identity = HostIdentity::new(store, "employees", config("emp-42"));

        let profile = identity.identify().await.unwrap();
        assert_eq!(profile.id, "emp-42");
        assert_eq!(profile.role, Role::Manager);
        assert!(profile.has_permission("orders.write"));
        assert!(!profile.has_permission("staff.manage"));
    }

    #[tokio::test]
    async fn each_call_re_resolves() {
        let store = Arc::new(FixtureStore::with_rows(vec![employee_row()]));
        let identity = HostIdentity::new(store.clone(), "employees", config("emp-42"));

        identity.identify().await.unwrap();
        identity.identify().await.unwrap();
        assert_eq!(*store.selects.lock(), 2);
    }

    #[tokio::test]
    async fn unknown_employee_is_an_error() {
        let store = Arc::new(FixtureStore::with_rows(vec![employee_row()]));
        let identity = HostIdentity::new(store, "employees", config("emp-404"));

        let err = identity.identify().await.unwrap_err();
        assert!(err.to_string().contains("emp-404"));
    }

    #[tokio::test]
    async fn empty_config_is_an_error() {
        let store = Arc::new(FixtureStore::with_rows(vec![]));
        let identity = HostIdentity::new(store, "employees", config(""));

        let err = identity.identify().await.unwrap_err();
        assert!(err.to_string().contains("no employee configured"));
    }

    #[tokio::test]
    async fn store_failure_surfaces_in_error() {
        let store = Arc::new(FixtureStore::failing());
        let identity = HostIdentity::new(store, "employees", config("emp-42"));

        let err = identity.identify().await.unwrap_err();
        assert!(err.to_string().contains("store offline"));
    }

    #[tokio::test]
    async fn malformed_profile_is_an_error() {
        let store = Arc::new(FixtureStore::with_rows(vec![json!({
            "id": "emp-42",
            "role": "intern"
        })]));
        let identity = HostIdentity::new(store, "employees", config("emp-42"));

        let err = identity.identify().await.unwrap_err();
        assert!(err.to_string().contains("malformed profile"));
    }
}
