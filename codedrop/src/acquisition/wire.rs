//! JSON bodies exchanged with the deployment service.

use serde::{Deserialize, Serialize};

use crate::config::UpdaterConfig;
use crate::package::{Package, StatusReport};

/// Response of `GET /update_check`.
#[derive(Debug, Deserialize)]
pub struct UpdateCheckResponse {
    pub update_info: UpdateInfo,
}

/// Update description returned by the service.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateInfo {
    pub is_available: bool,
    pub download_url: Option<String>,
    pub package_hash: Option<String>,
    pub label: Option<String>,
    pub app_version: Option<String>,
    pub description: Option<String>,
    pub is_mandatory: bool,
    pub package_size: u64,
    /// A newer binary is required before this update applies.
    pub update_app_version: bool,
    /// The service wants the client back on its binary version.
    pub should_run_binary_version: bool,
}

/// Body of `POST /report_status/deploy`.
#[derive(Debug, Serialize)]
pub struct DeployStatusBody<'a> {
    pub app_version: &'a str,
    pub deployment_key: &'a str,
    pub client_unique_id: &'a str,
    pub label: &'a str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_label_or_app_version: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_deployment_key: Option<&'a str>,
}

impl<'a> DeployStatusBody<'a> {
    pub fn new(config: &'a UpdaterConfig, report: &'a StatusReport) -> Self {
        let package = &report.package;
        Self {
            app_version: if package.app_version.is_empty() {
                config.app_version()
            } else {
                &package.app_version
            },
            deployment_key: if package.deployment_key.is_empty() {
                config.deployment_key()
            } else {
                &package.deployment_key
            },
            client_unique_id: config.client_unique_id(),
            label: &package.label,
            status: report.status.as_str(),
            previous_label_or_app_version: report.previous_label_or_app_version.as_deref(),
            previous_deployment_key: report.previous_deployment_key.as_deref(),
        }
    }
}

/// Body of `POST /report_status/download`.
#[derive(Debug, Serialize)]
pub struct DownloadStatusBody<'a> {
    pub client_unique_id: &'a str,
    pub deployment_key: &'a str,
    pub label: &'a str,
}

impl<'a> DownloadStatusBody<'a> {
    pub fn new(config: &'a UpdaterConfig, package: &'a Package) -> Self {
        Self {
            client_unique_id: config.client_unique_id(),
            deployment_key: config.deployment_key(),
            label: &package.label,
        }
    }
}
