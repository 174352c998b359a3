//! Shared setup for commands that talk to the updater.

use std::path::{Path, PathBuf};

use codedrop::config::{ConfigFile, UpdaterConfig};
use codedrop::logging::{init_logging, LoggingConfig, WorkerGuard};
use codedrop::{Capabilities, UpdateCore};
use tracing::info;

use crate::error::CliError;

/// Loaded configuration plus the logging guard for one CLI invocation.
pub struct CliRunner {
    config: ConfigFile,
    config_path: PathBuf,
    _log_guard: Option<WorkerGuard>,
}

impl CliRunner {
    /// Load the configuration file and install logging.
    pub fn new(config_path: Option<&Path>, verbose: bool) -> Result<Self, CliError> {
        let config_path = match config_path {
            Some(path) => path.to_path_buf(),
            None => ConfigFile::default_path()?,
        };
        let config = ConfigFile::load_from(&config_path)?;

        let mut logging = LoggingConfig::from(&config.logging);
        if verbose {
            logging = logging.with_level("debug");
        }
        let guard = init_logging(&logging)?;

        Ok(Self {
            config,
            config_path,
            _log_guard: guard,
        })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    pub fn log_startup(&self, command: &str) {
        info!(
            version = codedrop::VERSION,
            command,
            config = %self.config_path.display(),
            "codedrop starting"
        );
    }

    /// Validated runtime configuration.
    pub fn updater_config(&self) -> Result<UpdaterConfig, CliError> {
        self.config.to_updater_config().map_err(|e| {
            CliError::Config(format!(
                "{}. Run 'codedrop config init' or edit {}",
                e,
                self.config_path.display()
            ))
        })
    }

    /// Open the updater over the configured storage.
    pub fn open(&self, capabilities: Capabilities) -> Result<UpdateCore, CliError> {
        Ok(UpdateCore::open(self.updater_config()?, capabilities)?)
    }
}
