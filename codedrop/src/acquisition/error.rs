//! Acquisition errors.

use thiserror::Error;

/// Result type for acquisition operations.
pub type AcquisitionResult<T> = Result<T, AcquisitionError>;

/// Failures talking to the deployment service.
///
/// None of these means "no update": that is `Ok(None)`.
#[derive(Debug, Clone, Error)]
pub enum AcquisitionError {
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("invalid response from {url}: {reason}")]
    InvalidResponse { url: String, reason: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
