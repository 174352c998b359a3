//! Core package identity type.
//!
//! The [`Package`] struct carries the fields every view of an update shares,
//! whether it is still on the server ([`RemotePackage`](super::RemotePackage))
//! or already unpacked on disk ([`LocalPackage`](super::LocalPackage)).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Core package identity.
///
/// A package is immutable once created and is identified by its content
/// fingerprint, `package_hash`.
///
/// # Example
///
/// ```
/// use codedrop::package::Package;
///
/// let package = Package::new("abc123", "1.2.0")
///     .with_label("v7")
///     .with_mandatory(true);
///
/// assert_eq!(package.package_hash, "abc123");
/// assert!(package.is_mandatory);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Package {
    /// Content fingerprint, unique per package.
    pub package_hash: String,

    /// Server-assigned release label (e.g. "v12").
    #[serde(default)]
    pub label: String,

    /// Binary version this package targets.
    pub app_version: String,

    /// Deployment key the package was released to.
    #[serde(default)]
    pub deployment_key: String,

    /// Release notes.
    #[serde(default)]
    pub description: String,

    /// Mandatory updates bypass user confirmation.
    #[serde(default)]
    pub is_mandatory: bool,

    /// Payload size in bytes as reported by the server.
    #[serde(default)]
    pub package_size: u64,
}

impl Package {
    /// Create a package with the given hash and target app version.
    pub fn new(package_hash: impl Into<String>, app_version: impl Into<String>) -> Self {
        Self {
            package_hash: package_hash.into(),
            app_version: app_version.into(),
            ..Default::default()
        }
    }

    /// Set the release label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the deployment key.
    pub fn with_deployment_key(mut self, key: impl Into<String>) -> Self {
        self.deployment_key = key.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the mandatory flag.
    pub fn with_mandatory(mut self, mandatory: bool) -> Self {
        self.is_mandatory = mandatory;
        self
    }

    /// Set the payload size.
    pub fn with_size(mut self, size: u64) -> Self {
        self.package_size = size;
        self
    }

    /// Label if one was assigned, otherwise the app version.
    ///
    /// Status reports use this to identify what the client was running before
    /// an update.
    pub fn label_or_app_version(&self) -> &str {
        if self.label.is_empty() {
            &self.app_version
        } else {
            &self.label
        }
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.is_empty() {
            write!(f, "{} ({})", self.package_hash, self.app_version)
        } else {
            write!(
                f,
                "{} {} ({})",
                self.label, self.package_hash, self.app_version
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_builder() {
        let package = Package::new("hash", "1.0.0")
            .with_label("v3")
            .with_deployment_key("key")
            .with_description("fixes")
            .with_mandatory(true)
            .with_size(2048);

        assert_eq!(package.package_hash, "hash");
        assert_eq!(package.app_version, "1.0.0");
        assert_eq!(package.label, "v3");
        assert_eq!(package.deployment_key, "key");
        assert_eq!(package.description, "fixes");
        assert!(package.is_mandatory);
        assert_eq!(package.package_size, 2048);
    }

    #[test]
    fn test_label_or_app_version() {
        let unlabeled = Package::new("hash", "2.1.0");
        assert_eq!(unlabeled.label_or_app_version(), "2.1.0");

        let labeled = unlabeled.with_label("v9");
        assert_eq!(labeled.label_or_app_version(), "v9");
    }

    #[test]
    fn test_display() {
        let package = Package::new("abc", "1.0.0").with_label("v1");
        assert_eq!(package.to_string(), "v1 abc (1.0.0)");
        assert_eq!(Package::new("abc", "1.0.0").to_string(), "abc (1.0.0)");
    }

    #[test]
    fn test_deserialize_tolerates_missing_optional_fields() {
        let json = r#"{"package_hash":"abc","app_version":"1.0.0"}"#;
        let package: Package = serde_json::from_str(json).unwrap();
        assert_eq!(package, Package::new("abc", "1.0.0"));
    }
}
