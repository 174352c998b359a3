//! INI configuration file.
//!
//! The file lives at `~/.config/codedrop/config.ini` by default:
//!
//! ```ini
//! [deployment]
//! key = prod-3f9a
//! server_url = https://updates.codedrop.dev
//! public_key =
//!
//! [app]
//! version = 1.4.0
//! name = notes
//! client_id =
//! check_frequency = on-app-start
//!
//! [storage]
//! directory = ~/.local/share/codedrop
//!
//! [logging]
//! directory = ~/.local/share/codedrop/logs
//! level = info
//! ```
//!
//! Missing keys fall back to defaults. Values that are present but cannot be
//! interpreted are reported as [`ConfigError::InvalidValue`].

use std::fs;
use std::path::{Path, PathBuf};

use ini::Ini;

use super::error::{ConfigError, ConfigResult};
use super::updater::{CheckFrequency, UpdaterConfig, DEFAULT_SERVER_URL};

/// Configuration file name inside the config directory.
pub const CONFIG_FILENAME: &str = "config.ini";

/// `[deployment]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentSettings {
    pub key: String,
    pub server_url: String,
    pub public_key: Option<String>,
}

/// `[app]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub version: String,
    pub name: Option<String>,
    pub client_id: Option<String>,
    pub check_frequency: CheckFrequency,
}

/// `[storage]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageSettings {
    pub directory: PathBuf,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub directory: Option<PathBuf>,
    pub level: String,
}

/// Parsed configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub deployment: DeploymentSettings,
    pub app: AppSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

impl Default for ConfigFile {
    fn default() -> Self {
        let data_dir = default_data_dir();
        Self {
            deployment: DeploymentSettings {
                key: String::new(),
                server_url: DEFAULT_SERVER_URL.to_string(),
                public_key: None,
            },
            app: AppSettings {
                version: "1.0.0".to_string(),
                name: None,
                client_id: None,
                check_frequency: CheckFrequency::default(),
            },
            storage: StorageSettings {
                directory: data_dir.clone(),
            },
            logging: LoggingSettings {
                directory: Some(data_dir.join("logs")),
                level: "info".to_string(),
            },
        }
    }
}

impl ConfigFile {
    /// Default location of the configuration file.
    pub fn default_path() -> ConfigResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("codedrop").join(CONFIG_FILENAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from the default location, or defaults if the file does not exist.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from a specific path, or defaults if the file does not exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::from_ini(&ini)
    }

    /// Interpret a parsed INI document.
    pub fn from_ini(ini: &Ini) -> ConfigResult<Self> {
        let mut config = Self::default();
        let get = |section: &str, key: &str| -> Option<String> {
            ini.section(Some(section))
                .and_then(|s| s.get(key))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(key) = get("deployment", "key") {
            config.deployment.key = key;
        }
        if let Some(url) = get("deployment", "server_url") {
            config.deployment.server_url = url;
        }
        config.deployment.public_key = get("deployment", "public_key");

        if let Some(version) = get("app", "version") {
            config.app.version = version;
        }
        config.app.name = get("app", "name");
        config.app.client_id = get("app", "client_id");
        if let Some(value) = get("app", "check_frequency") {
            config.app.check_frequency =
                CheckFrequency::from_config_str(&value).ok_or_else(|| ConfigError::InvalidValue {
                    section: "app".to_string(),
                    key: "check_frequency".to_string(),
                    value: value.clone(),
                    reason: "expected on-app-start, on-app-resume or manual".to_string(),
                })?;
        }

        if let Some(dir) = get("storage", "directory") {
            config.storage.directory = expand_tilde(&dir);
        }

        if let Some(dir) = get("logging", "directory") {
            config.logging.directory = Some(expand_tilde(&dir));
        }
        if let Some(level) = get("logging", "level") {
            config.logging.level = level;
        }

        Ok(config)
    }

    /// Write the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut ini = Ini::new();
        ini.with_section(Some("deployment"))
            .set("key", self.deployment.key.as_str())
            .set("server_url", self.deployment.server_url.as_str())
            .set(
                "public_key",
                self.deployment.public_key.clone().unwrap_or_default(),
            );
        ini.with_section(Some("app"))
            .set("version", self.app.version.as_str())
            .set("name", self.app.name.clone().unwrap_or_default())
            .set("client_id", self.app.client_id.clone().unwrap_or_default())
            .set("check_frequency", self.app.check_frequency.to_string());
        ini.with_section(Some("storage"))
            .set("directory", self.storage.directory.to_string_lossy());
        ini.with_section(Some("logging"))
            .set(
                "directory",
                self.logging
                    .directory
                    .as_ref()
                    .map(|d| d.to_string_lossy().to_string())
                    .unwrap_or_default(),
            )
            .set("level", self.logging.level.as_str());

        ini.write_to_file(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Convert to the runtime configuration, validating every field.
    pub fn to_updater_config(&self) -> ConfigResult<UpdaterConfig> {
        let mut config = UpdaterConfig::new(
            self.deployment.key.as_str(),
            self.app.version.as_str(),
            self.storage.directory.clone(),
        )?
        .with_server_url(self.deployment.server_url.as_str())?
        .with_public_key(self.deployment.public_key.clone())?
        .with_app_name(self.app.name.clone())
        .with_check_frequency(self.app.check_frequency);

        if let Some(ref id) = self.app.client_id {
            config = config.with_client_unique_id(id.as_str())?;
        }

        Ok(config)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("codedrop")
}

fn expand_tilde(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ConfigFile::load_from(&temp.path().join("absent.ini")).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_load_sections() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            "[deployment]\nkey = prod-1\nserver_url = https://u.example\n\n\
             [app]\nversion = 2.3\ncheck_frequency = manual\n\n\
             [storage]\ndirectory = /var/lib/app\n",
        )
        .unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.deployment.key, "prod-1");
        assert_eq!(config.deployment.server_url, "https://u.example");
        assert_eq!(config.app.version, "2.3");
        assert_eq!(config.app.check_frequency, CheckFrequency::Manual);
        assert_eq!(config.storage.directory, PathBuf::from("/var/lib/app"));
        assert!(config.deployment.public_key.is_none());
    }

    #[test]
    fn test_invalid_check_frequency() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "[app]\ncheck_frequency = hourly\n").unwrap();

        let result = ConfigFile::load_from(&path);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_save_and_reload() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join(CONFIG_FILENAME);

        let mut config = ConfigFile::default();
        config.deployment.key = "staging".to_string();
        config.app.client_id = Some("device-1".to_string());
        config.save_to(&path).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded.deployment.key, "staging");
        assert_eq!(loaded.app.client_id.as_deref(), Some("device-1"));
    }

    #[test]
    fn test_to_updater_config_requires_key() {
        let config = ConfigFile::default();
        assert!(matches!(
            config.to_updater_config(),
            Err(ConfigError::IllegalArgument {
                field: "deploymentKey",
                ..
            })
        ));
    }

    #[test]
    fn test_to_updater_config() {
        let mut config = ConfigFile::default();
        config.deployment.key = "prod".to_string();
        config.app.client_id = Some("device-9".to_string());

        let updater = config.to_updater_config().unwrap();
        assert_eq!(updater.deployment_key(), "prod");
        assert_eq!(updater.client_unique_id(), "device-9");
        assert_eq!(updater.base_directory(), config.storage.directory.as_path());
    }
}
