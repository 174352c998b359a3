//! CLI error type.

use std::fmt;

use codedrop::config::ConfigError;
use codedrop::logging::LoggingError;
use codedrop::UpdaterError;

/// Errors reported to the user before exiting with status 1.
#[derive(Debug)]
pub enum CliError {
    /// Configuration missing or invalid.
    Config(String),
    /// Logging could not be set up.
    Logging(LoggingError),
    /// An updater operation failed.
    Updater(UpdaterError),
    /// Interactive prompt failed.
    Prompt(String),
    /// The sync cycle ended with `UNKNOWN_ERROR`.
    SyncFailed,
    /// The launched application exited unsuccessfully.
    AppExited(Option<i32>),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Logging(e) => write!(f, "Logging setup failed: {}", e),
            CliError::Updater(e) => write!(f, "{}", e),
            CliError::Prompt(msg) => write!(f, "Prompt failed: {}", msg),
            CliError::SyncFailed => write!(
                f,
                "Sync did not complete. Run with --verbose for details."
            ),
            CliError::AppExited(Some(code)) => write!(f, "Application exited with status {}", code),
            CliError::AppExited(None) => write!(f, "Application was terminated by a signal"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e)
    }
}

impl From<UpdaterError> for CliError {
    fn from(e: UpdaterError) -> Self {
        CliError::Updater(e)
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(e: dialoguer::Error) -> Self {
        CliError::Prompt(e.to_string())
    }
}
