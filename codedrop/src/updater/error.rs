//! Updater error types.

use std::error::Error as StdError;

use thiserror::Error;

use crate::acquisition::AcquisitionError;
use crate::config::ConfigError;
use crate::settings::SettingsError;
use crate::store::StoreError;

/// Result type for public updater operations.
pub type UpdaterResult<T> = Result<T, UpdaterError>;

/// The single error kind surfaced to host applications.
///
/// Lower-level errors are kept as the `source`, so hosts can still log the
/// full chain or downcast when they need to.
#[derive(Debug, Error)]
pub enum UpdaterError {
    #[error("{operation} failed: {source}")]
    NativeApiCall {
        operation: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl UpdaterError {
    pub(crate) fn native(
        operation: &'static str,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self::NativeApiCall {
            operation,
            source: source.into(),
        }
    }

    /// Name of the public operation that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::NativeApiCall { operation, .. } => operation,
        }
    }
}

/// Failure inside a sync cycle, classified by how the cycle ends.
#[derive(Debug)]
pub(crate) enum SyncError {
    /// Invalid configuration. Exceptional.
    Config(ConfigError),
    /// Settings store failure. Exceptional.
    Settings(SettingsError),
    /// Package store failure outside the download. Exceptional.
    Store(StoreError),
    /// Service unreachable or misbehaving. Ends the cycle with `UNKNOWN_ERROR`.
    Acquisition(AcquisitionError),
    /// Download failed. Ends the cycle with `UNKNOWN_ERROR`.
    Download(StoreError),
    /// Cancellation observed at a phase boundary.
    Cancelled,
}

impl SyncError {
    /// Whether the cycle may end with a status instead of an error.
    pub(crate) fn is_recoverable(&self) -> bool {
        matches!(self, Self::Acquisition(_) | Self::Download(_) | Self::Cancelled)
    }

    pub(crate) fn into_updater_error(self, operation: &'static str) -> UpdaterError {
        match self {
            Self::Config(e) => UpdaterError::native(operation, e),
            Self::Settings(e) => UpdaterError::native(operation, e),
            Self::Store(e) | Self::Download(e) => UpdaterError::native(operation, e),
            Self::Acquisition(e) => UpdaterError::native(operation, e),
            Self::Cancelled => UpdaterError::native(operation, "cancelled"),
        }
    }
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{}", e),
            Self::Settings(e) => write!(f, "{}", e),
            Self::Store(e) | Self::Download(e) => write!(f, "{}", e),
            Self::Acquisition(e) => write!(f, "{}", e),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl From<ConfigError> for SyncError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<SettingsError> for SyncError {
    fn from(e: SettingsError) -> Self {
        Self::Settings(e)
    }
}
