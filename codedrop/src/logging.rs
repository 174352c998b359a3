//! Tracing subscriber setup.
//!
//! Library code only emits `tracing` events. Hosts call [`init_logging`] once
//! to get stderr output with local timestamps and, optionally, a daily
//! rolling log file.
//!
//! `RUST_LOG` overrides the configured level:
//!
//! ```bash
//! RUST_LOG=codedrop=debug codedrop sync
//! ```

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::UtcOffset;
pub use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingSettings;

/// Default log file prefix; the appender adds a date suffix.
pub const DEFAULT_LOG_PREFIX: &str = "codedrop.log";

/// Logging errors.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter {filter:?}: {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("failed to create log directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Logging options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Level for the codedrop crates (`error` .. `trace`).
    pub level: String,
    /// Directory for rolling log files; `None` logs to stderr only.
    pub directory: Option<PathBuf>,
    /// File name prefix of the rolling log.
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: DEFAULT_LOG_PREFIX.to_string(),
        }
    }
}

impl LoggingConfig {
    /// Override the level.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Directive string used when `RUST_LOG` is not set.
    pub fn filter_directive(&self) -> String {
        format!("codedrop={0},codedrop_cli={0}", self.level)
    }
}

impl From<&LoggingSettings> for LoggingConfig {
    fn from(settings: &LoggingSettings) -> Self {
        Self {
            level: settings.level.clone(),
            directory: settings.directory.clone(),
            file_prefix: DEFAULT_LOG_PREFIX.to_string(),
        }
    }
}

/// Install the global subscriber.
///
/// Returns the file appender's guard when file logging is enabled; buffered
/// lines are flushed when it is dropped, so the host keeps it alive.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directive = config.filter_directive();
            EnvFilter::try_new(&directive).map_err(|e| LoggingError::InvalidFilter {
                filter: directive.clone(),
                reason: e.to_string(),
            })?
        }
    };

    let timer = local_timer();

    let (file_layer, guard) = match config.directory {
        Some(ref dir) => {
            fs::create_dir_all(dir).map_err(|e| LoggingError::CreateDir {
                path: dir.clone(),
                source: e,
            })?;
            let appender = tracing_appender::rolling::daily(dir, &config.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_timer(timer.clone());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_timer(timer),
        )
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    Ok(guard)
}

/// RFC 3339 timestamps in the local offset, or UTC when it cannot be determined.
fn local_timer() -> OffsetTime<Rfc3339> {
    OffsetTime::local_rfc_3339().unwrap_or_else(|_| OffsetTime::new(UtcOffset::UTC, Rfc3339))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        let config = LoggingConfig::default().with_level("debug");
        assert_eq!(config.filter_directive(), "codedrop=debug,codedrop_cli=debug");
        assert!(EnvFilter::try_new(config.filter_directive()).is_ok());
    }

    #[test]
    fn test_from_settings() {
        let settings = LoggingSettings {
            directory: Some(PathBuf::from("/var/log/app")),
            level: "warn".to_string(),
        };
        let config = LoggingConfig::from(&settings);
        assert_eq!(config.level, "warn");
        assert_eq!(config.directory, Some(PathBuf::from("/var/log/app")));
        assert_eq!(config.file_prefix, DEFAULT_LOG_PREFIX);
    }
}
