//! Configuration error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while building or loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration input was rejected (e.g. malformed deployment key).
    #[error("illegal argument for {field}: {reason}")]
    IllegalArgument { field: &'static str, reason: String },

    /// A value in the configuration file could not be interpreted.
    #[error("invalid value for [{section}] {key} = '{value}': {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// The configuration file could not be parsed as INI.
    #[error("failed to parse {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    /// The configuration file could not be read or written.
    #[error("configuration I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No usable configuration directory on this platform.
    #[error("could not determine configuration directory")]
    NoConfigDir,
}

impl ConfigError {
    pub(crate) fn illegal(field: &'static str, reason: impl Into<String>) -> Self {
        Self::IllegalArgument {
            field,
            reason: reason.into(),
        }
    }
}
