//! Errors raised by platform utilities.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Failures of the download, unpack, diff and reload capabilities.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("failed to download {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    /// The operation observed a cancellation request and stopped.
    #[error("operation cancelled")]
    Cancelled,

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to extract {}: {reason}", .path.display())]
    Extraction { path: PathBuf, reason: String },

    #[error("failed to apply diff: {0}")]
    Diff(String),

    #[error("invalid signature: {0}")]
    Signature(String),

    /// The host could not reload the application.
    #[error("failed to load app: {0}")]
    Load(String),
}

impl PlatformError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
