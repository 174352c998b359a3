//! Deployment status reports sent back to the deployment service.

use serde::{Deserialize, Serialize};

use super::core::Package;

/// Outcome of an update from the device's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentStatus {
    /// The package started and confirmed itself.
    Succeeded,
    /// The package crashed before confirming and was rolled back.
    Failed,
}

impl DeploymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Succeeded => "DeploymentSucceeded",
            Self::Failed => "DeploymentFailed",
        }
    }
}

/// A deploy status report.
///
/// Reports are persisted when they cannot be delivered so they can be retried
/// on the next app resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Outcome being reported.
    pub status: DeploymentStatus,

    /// The package the report is about.
    pub package: Package,

    /// Label (or binary version) the client ran before this package.
    #[serde(default)]
    pub previous_label_or_app_version: Option<String>,

    /// Deployment key of the previous package.
    #[serde(default)]
    pub previous_deployment_key: Option<String>,
}

impl StatusReport {
    /// Report that `package` is now running successfully.
    pub fn succeeded(package: Package, previous: Option<&Package>) -> Self {
        Self {
            status: DeploymentStatus::Succeeded,
            package,
            previous_label_or_app_version: previous.map(|p| p.label_or_app_version().to_string()),
            previous_deployment_key: previous.map(|p| p.deployment_key.clone()),
        }
    }

    /// Report that `package` failed and was rolled back.
    pub fn failed(package: Package) -> Self {
        Self {
            status: DeploymentStatus::Failed,
            package,
            previous_label_or_app_version: None,
            previous_deployment_key: None,
        }
    }

    /// Identifier used to avoid reporting the same deployment twice.
    pub fn identifier(&self) -> String {
        format!(
            "{}:{}",
            self.package.deployment_key,
            self.package.label_or_app_version()
        )
    }
}
