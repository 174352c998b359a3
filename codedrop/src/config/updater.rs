//! Runtime configuration consumed by the updater.
//!
//! [`UpdaterConfig`] is the read-only surface a sync cycle captures at its
//! start: which deployment to track, where the service lives, which binary
//! version is running and where packages are stored on disk.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use semver::Version;
use sha2::{Digest, Sha256};

use super::error::{ConfigError, ConfigResult};

/// Default deployment service endpoint.
pub const DEFAULT_SERVER_URL: &str = "https://updates.codedrop.dev";

/// Directory under the base directory holding all updater state.
pub const STORAGE_DIR_NAME: &str = "codedrop";

/// Length of an ed25519 public key encoded as hex.
const PUBLIC_KEY_HEX_LEN: usize = 64;

/// When the host app checks for updates automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckFrequency {
    /// When the app has finished starting.
    #[default]
    OnAppStart,
    /// Whenever the app re-enters the foreground.
    OnAppResume,
    /// Only when the host calls `sync` itself.
    Manual,
}

impl CheckFrequency {
    /// Parse from a config file string.
    pub fn from_config_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "on-app-start" | "start" => Some(Self::OnAppStart),
            "on-app-resume" | "resume" => Some(Self::OnAppResume),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }
}

impl fmt::Display for CheckFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OnAppStart => "on-app-start",
            Self::OnAppResume => "on-app-resume",
            Self::Manual => "manual",
        };
        f.write_str(name)
    }
}

/// Configuration for an updater instance.
///
/// Setters that validate their input return `ConfigResult<Self>` and reject
/// bad values with [`ConfigError::IllegalArgument`].
///
/// # Example
///
/// ```
/// use codedrop::config::UpdaterConfig;
///
/// let config = UpdaterConfig::new("prod-key", "1.4.0", "/tmp/codedrop")
///     .unwrap()
///     .with_server_url("https://updates.example.com/")
///     .unwrap();
///
/// assert_eq!(config.server_url(), "https://updates.example.com");
/// assert_eq!(config.app_version(), "1.4.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdaterConfig {
    deployment_key: String,
    server_url: String,
    public_key: Option<String>,
    app_version: String,
    app_name: Option<String>,
    client_unique_id: String,
    base_directory: PathBuf,
    check_frequency: CheckFrequency,
}

impl UpdaterConfig {
    /// Create a configuration with the default server URL and a generated
    /// client id.
    pub fn new(
        deployment_key: impl Into<String>,
        app_version: impl Into<String>,
        base_directory: impl Into<PathBuf>,
    ) -> ConfigResult<Self> {
        let base_directory = base_directory.into();
        let client_unique_id = generate_client_id(&base_directory);

        Self {
            deployment_key: String::new(),
            server_url: DEFAULT_SERVER_URL.to_string(),
            public_key: None,
            app_version: String::new(),
            app_name: None,
            client_unique_id,
            base_directory,
            check_frequency: CheckFrequency::default(),
        }
        .with_deployment_key(deployment_key)?
        .with_app_version(app_version)
    }

    /// Replace the deployment key.
    pub fn with_deployment_key(mut self, key: impl Into<String>) -> ConfigResult<Self> {
        self.set_deployment_key(key)?;
        Ok(self)
    }

    /// Replace the deployment key in place.
    pub fn set_deployment_key(&mut self, key: impl Into<String>) -> ConfigResult<()> {
        let key = key.into();
        validate_deployment_key(&key)?;
        self.deployment_key = key;
        Ok(())
    }

    /// Set the deployment service URL. A trailing slash is dropped.
    pub fn with_server_url(mut self, url: impl Into<String>) -> ConfigResult<Self> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');
        let host = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .ok_or_else(|| {
                ConfigError::illegal("serverUrl", format!("'{}' is not an http(s) URL", url))
            })?;
        if host.is_empty() {
            return Err(ConfigError::illegal("serverUrl", "missing host"));
        }
        self.server_url = trimmed.to_string();
        Ok(self)
    }

    /// Set the hex-encoded ed25519 public key used to verify signed packages.
    pub fn with_public_key(mut self, key: Option<String>) -> ConfigResult<Self> {
        if let Some(ref key) = key {
            let key = key.trim();
            if key.len() != PUBLIC_KEY_HEX_LEN || hex::decode(key).is_err() {
                return Err(ConfigError::illegal(
                    "publicKey",
                    format!("expected {} hex characters", PUBLIC_KEY_HEX_LEN),
                ));
            }
        }
        self.public_key = key.map(|k| k.trim().to_string());
        Ok(self)
    }

    /// Override the binary version reported to the server.
    pub fn with_app_version(mut self, version: impl Into<String>) -> ConfigResult<Self> {
        let version = version.into();
        if parse_lenient_version(&version).is_none() {
            return Err(ConfigError::illegal(
                "appVersion",
                format!("'{}' is not a semantic version", version),
            ));
        }
        self.app_version = version;
        Ok(self)
    }

    /// Set the client unique id.
    pub fn with_client_unique_id(mut self, id: impl Into<String>) -> ConfigResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ConfigError::illegal("clientUniqueId", "must not be empty"));
        }
        self.client_unique_id = id;
        Ok(self)
    }

    /// Set the application name.
    pub fn with_app_name(mut self, name: Option<String>) -> Self {
        self.app_name = name;
        self
    }

    /// Set the base storage directory.
    pub fn with_base_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_directory = dir.into();
        self
    }

    /// Set the automatic check frequency.
    pub fn with_check_frequency(mut self, frequency: CheckFrequency) -> Self {
        self.check_frequency = frequency;
        self
    }

    pub fn deployment_key(&self) -> &str {
        &self.deployment_key
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn public_key(&self) -> Option<&str> {
        self.public_key.as_deref()
    }

    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    pub fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }

    pub fn client_unique_id(&self) -> &str {
        &self.client_unique_id
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Root of the settings record and package store.
    pub fn storage_root(&self) -> PathBuf {
        self.base_directory.join(STORAGE_DIR_NAME)
    }

    pub fn check_frequency(&self) -> CheckFrequency {
        self.check_frequency
    }
}

fn validate_deployment_key(key: &str) -> ConfigResult<()> {
    if key.trim().is_empty() {
        return Err(ConfigError::illegal("deploymentKey", "must not be empty"));
    }
    if let Some(bad) = key
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(ConfigError::illegal(
            "deploymentKey",
            format!("unexpected character {:?}", bad),
        ));
    }
    Ok(())
}

/// Parse a version that may omit minor/patch components ("2", "2.1").
///
/// Returns `None` if the string is not a version at all.
pub fn parse_lenient_version(s: &str) -> Option<Version> {
    let s = s.trim();
    if let Ok(version) = Version::parse(s) {
        return Some(version);
    }

    let parts: Vec<&str> = s.split('.').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }
    let mut numbers = [0u64; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        *slot = part.parse().ok()?;
    }
    Some(Version::new(numbers[0], numbers[1], numbers[2]))
}

/// Whether two app version strings denote the same binary version.
pub fn same_app_version(a: &str, b: &str) -> bool {
    match (parse_lenient_version(a), parse_lenient_version(b)) {
        (Some(a), Some(b)) => a == b,
        _ => a.trim() == b.trim(),
    }
}

fn generate_client_id(seed: &Path) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);

    let mut hasher = Sha256::new();
    hasher.update(seed.to_string_lossy().as_bytes());
    hasher.update(nanos.to_le_bytes());
    hasher.update(std::process::id().to_le_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..32].to_string()
}
