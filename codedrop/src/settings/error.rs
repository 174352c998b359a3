//! Settings store error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Errors raised by a settings store.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The persisted record exists but cannot be parsed.
    ///
    /// Never treated as "no pending update": a corrupt record is surfaced.
    #[error("malformed settings record at {}: {reason}", .path.display())]
    MalformedData { path: PathBuf, reason: String },

    /// The record could not be read.
    #[error("failed to read settings {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The record could not be written durably.
    #[error("failed to write settings {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An operation needed a pending update but none is recorded.
    #[error("no pending update recorded")]
    NoPendingUpdate,
}
