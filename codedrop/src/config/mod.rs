//! Configuration for the updater.
//!
//! Two layers:
//!
//! - [`ConfigFile`]: the INI file a CLI or host reads from disk
//! - [`UpdaterConfig`]: the validated runtime surface the updater consumes
//!
//! `ConfigFile::to_updater_config()` translates between them so validation
//! lives in one place.

mod error;
mod file;
mod updater;

pub use error::{ConfigError, ConfigResult};
pub use file::{
    AppSettings, ConfigFile, DeploymentSettings, LoggingSettings, StorageSettings, CONFIG_FILENAME,
};
pub use updater::{
    parse_lenient_version, same_app_version, CheckFrequency, UpdaterConfig, DEFAULT_SERVER_URL,
    STORAGE_DIR_NAME,
};
