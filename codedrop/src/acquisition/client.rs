//! HTTP acquisition client.

use reqwest::Url;
use tracing::{debug, info};

use super::error::{AcquisitionError, AcquisitionResult};
use super::transport::{HttpTransport, ReqwestTransport};
use super::wire::{DeployStatusBody, DownloadStatusBody, UpdateCheckResponse};
use super::AcquisitionClient;
use crate::config::UpdaterConfig;
use crate::package::{Package, RemotePackage, StatusReport};

/// API prefix of the deployment service.
const API_PREFIX: &str = "v0.1/public/codepush";

/// Acquisition client speaking the deployment service's JSON API.
pub struct HttpAcquisitionClient<T: HttpTransport = ReqwestTransport> {
    transport: T,
}

impl HttpAcquisitionClient<ReqwestTransport> {
    /// Create a client with the default reqwest transport.
    pub fn new() -> AcquisitionResult<Self> {
        Ok(Self::with_transport(ReqwestTransport::new()?))
    }
}

impl<T: HttpTransport> HttpAcquisitionClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn endpoint(config: &UpdaterConfig, path: &str) -> String {
        format!("{}/{}/{}", config.server_url(), API_PREFIX, path)
    }

    fn update_check_url(config: &UpdaterConfig, current: &Package) -> AcquisitionResult<Url> {
        let app_version = if current.app_version.is_empty() {
            config.app_version()
        } else {
            current.app_version.as_str()
        };

        Url::parse_with_params(
            &Self::endpoint(config, "update_check"),
            &[
                ("deployment_key", config.deployment_key()),
                ("app_version", app_version),
                ("package_hash", current.package_hash.as_str()),
                ("label", current.label.as_str()),
                ("client_unique_id", config.client_unique_id()),
                ("is_companion", "false"),
            ],
        )
        .map_err(|e| AcquisitionError::InvalidRequest(e.to_string()))
    }

    fn post<B: serde::Serialize>(&self, url: &str, body: &B) -> AcquisitionResult<()> {
        let value = serde_json::to_value(body)
            .map_err(|e| AcquisitionError::InvalidRequest(e.to_string()))?;
        self.transport.post_json(url, &value)
    }
}

impl<T: HttpTransport> AcquisitionClient for HttpAcquisitionClient<T> {
    fn query_update_with_current_package(
        &self,
        config: &UpdaterConfig,
        current: &Package,
    ) -> AcquisitionResult<Option<RemotePackage>> {
        let url = Self::update_check_url(config, current)?;
        let body = self.transport.get(url.as_str())?;

        let invalid = |reason: String| AcquisitionError::InvalidResponse {
            url: url.to_string(),
            reason,
        };

        let response: UpdateCheckResponse =
            serde_json::from_slice(&body).map_err(|e| invalid(e.to_string()))?;
        let info = response.update_info;

        if info.update_app_version {
            info!("Update available for a newer binary version only");
            return Ok(None);
        }
        if !info.is_available || info.should_run_binary_version {
            debug!(current = %current.package_hash, "No update available");
            return Ok(None);
        }

        let package_hash = info
            .package_hash
            .filter(|h| !h.is_empty())
            .ok_or_else(|| invalid("update is missing package_hash".to_string()))?;
        let download_url = info
            .download_url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| invalid("update is missing download_url".to_string()))?;

        let package = Package::new(
            package_hash,
            info.app_version.unwrap_or_else(|| config.app_version().to_string()),
        )
        .with_label(info.label.unwrap_or_default())
        .with_deployment_key(config.deployment_key())
        .with_description(info.description.unwrap_or_default())
        .with_mandatory(info.is_mandatory)
        .with_size(info.package_size);

        info!(
            hash = %package.package_hash,
            label = %package.label,
            mandatory = package.is_mandatory,
            "Update available"
        );
        Ok(Some(RemotePackage::new(package, download_url)))
    }

    fn report_status_deploy(
        &self,
        config: &UpdaterConfig,
        report: &StatusReport,
    ) -> AcquisitionResult<()> {
        let url = Self::endpoint(config, "report_status/deploy");
        self.post(&url, &DeployStatusBody::new(config, report))?;
        debug!(status = report.status.as_str(), label = %report.package.label, "Reported deploy status");
        Ok(())
    }

    fn report_status_download(
        &self,
        config: &UpdaterConfig,
        package: &Package,
    ) -> AcquisitionResult<()> {
        let url = Self::endpoint(config, "report_status/download");
        self.post(&url, &DownloadStatusBody::new(config, package))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::transport::tests::MockTransport;

    fn config() -> UpdaterConfig {
        UpdaterConfig::new("prod-key", "1.2.0", "/tmp/codedrop")
            .unwrap()
            .with_server_url("https://updates.example.com")
            .unwrap()
            .with_client_unique_id("device-1")
            .unwrap()
    }

    fn client(body: &str) -> HttpAcquisitionClient<MockTransport> {
        HttpAcquisitionClient::with_transport(MockTransport::replying(body))
    }

    #[test]
    fn test_update_available() {
        let client = client(
            r#"{"update_info": {
                "is_available": true,
                "download_url": "https://cdn.example.com/xyz",
                "package_hash": "xyz",
                "label": "v5",
                "app_version": "1.2.0",
                "description": "fixes",
                "is_mandatory": true,
                "package_size": 2048
            }}"#,
        );

        let current = Package::new("abc", "1.2.0").with_label("v4");
        let remote = client
            .query_update_with_current_package(&config(), &current)
            .unwrap()
            .unwrap();

        assert_eq!(remote.package_hash, "xyz");
        assert_eq!(remote.download_url, "https://cdn.example.com/xyz");
        assert_eq!(remote.deployment_key, "prod-key");
        assert!(remote.is_mandatory);
        assert_eq!(remote.package_size, 2048);

        let gets = client.transport().gets.lock();
        assert!(gets[0].starts_with("https://updates.example.com/v0.1/public/codepush/update_check?"));
        assert!(gets[0].contains("package_hash=abc"));
        assert!(gets[0].contains("label=v4"));
        assert!(gets[0].contains("client_unique_id=device-1"));
    }

    #[test]
    fn test_no_update() {
        let client = client(r#"{"update_info": {"is_available": false}}"#);
        let result = client
            .query_update_with_current_package(&config(), &Package::new("", "1.2.0"))
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_binary_update_required_is_no_update() {
        let client = client(
            r#"{"update_info": {"is_available": true, "update_app_version": true, "package_hash": "x", "download_url": "u"}}"#,
        );
        let result = client
            .query_update_with_current_package(&config(), &Package::new("", "1.2.0"))
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_missing_hash_is_invalid_response() {
        let client = client(r#"{"update_info": {"is_available": true, "download_url": "u"}}"#);
        let result = client.query_update_with_current_package(&config(), &Package::new("", "1.2.0"));
        assert!(matches!(result, Err(AcquisitionError::InvalidResponse { .. })));
    }

    #[test]
    fn test_garbage_body_is_invalid_response() {
        let client = client("<html>");
        let result = client.query_update_with_current_package(&config(), &Package::new("", "1.2.0"));
        assert!(matches!(result, Err(AcquisitionError::InvalidResponse { .. })));
    }

    #[test]
    fn test_transport_error_is_not_no_update() {
        let client = HttpAcquisitionClient::with_transport(MockTransport::failing(
            AcquisitionError::Status {
                url: "u".to_string(),
                status: 401,
            },
        ));
        let result = client.query_update_with_current_package(&config(), &Package::new("", "1.2.0"));
        assert!(matches!(result, Err(AcquisitionError::Status { status: 401, .. })));
    }

    #[test]
    fn test_report_deploy_body() {
        let client = client("{}");
        let previous = Package::new("abc", "1.2.0").with_label("v4").with_deployment_key("prod-key");
        let report = StatusReport::succeeded(
            Package::new("xyz", "1.2.0").with_label("v5"),
            Some(&previous),
        );

        client.report_status_deploy(&config(), &report).unwrap();

        let posts = client.transport().posts.lock();
        let (url, body) = &posts[0];
        assert!(url.ends_with("/report_status/deploy"));
        assert_eq!(body["status"], "DeploymentSucceeded");
        assert_eq!(body["label"], "v5");
        assert_eq!(body["deployment_key"], "prod-key");
        assert_eq!(body["previous_label_or_app_version"], "v4");
    }

    #[test]
    fn test_report_download_body() {
        let client = client("{}");
        client
            .report_status_download(&config(), &Package::new("xyz", "1.2.0").with_label("v5"))
            .unwrap();

        let posts = client.transport().posts.lock();
        assert!(posts[0].0.ends_with("/report_status/download"));
        assert_eq!(posts[0].1["client_unique_id"], "device-1");
    }
}
