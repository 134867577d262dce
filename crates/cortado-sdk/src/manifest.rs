//! Mini-app self-description.

use serde::{Deserialize, Serialize};

/// Identifies a mini-app to the host.
///
/// The `app_id` is the stable identity used in audit records and commit
/// options; `name` and `version` are informational.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppDescriptor {
    /// Stable identifier, e.g. `"kds-zero-g"`.
    pub app_id: String,

    /// Human-readable name.
    pub name: String,

    /// Semantic version string.
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

impl AppDescriptor {
    /// Create a descriptor with the default version.
    pub fn new(app_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            name: name.into(),
            version: default_version(),
        }
    }

    /// Override the version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_defaults_version() {
        let d = AppDescriptor::new("kds-zero-g", "Kitchen Display");
        assert_eq!(d.version, "0.1.0");
    }

    #[test]
    fn descriptor_version_defaults_on_deserialize() {
        let d: AppDescriptor =
            serde_json::from_str(r#"{"app_id": "a", "name": "A"}"#).unwrap();
        assert_eq!(d.version, "0.1.0");
    }

    #[test]
    fn descriptor_builder_overrides_version() {
        let d = AppDescriptor::new("a", "A").with_version("2.1.0");
        assert_eq!(d.version, "2.1.0");
    }
}
