//! Error types for the package store.

use std::io;
use std::path::PathBuf;

use crate::platform::PlatformError;

/// Result type for package store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while storing, installing or reading packages.
#[derive(Debug)]
pub enum StoreError {
    /// Failed to read a file or directory.
    ReadFailed { path: PathBuf, source: io::Error },

    /// Failed to write a file or directory.
    WriteFailed { path: PathBuf, source: io::Error },

    /// Failed to create a directory.
    CreateDirFailed { path: PathBuf, source: io::Error },

    /// Package metadata exists but cannot be interpreted.
    ///
    /// Distinct from "no package", which is `Ok(None)`.
    GetPackage { path: PathBuf, reason: String },

    /// A package hash that cannot name a slot directory.
    InvalidHash { hash: String },

    /// Download, unpack or diff failed in the platform layer.
    Platform(PlatformError),

    /// The download was cancelled.
    Cancelled,

    /// Unpacked content does not match the advertised package hash.
    HashMismatch { expected: String, actual: String },

    /// The package signature did not verify.
    SignatureInvalid { hash: String },

    /// The expected entry file is not in the package.
    EntryPointNotFound { file_name: String },

    /// The package is already the current package.
    AlreadyInstalled { hash: String },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadFailed { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            Self::WriteFailed { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
            Self::CreateDirFailed { path, source } => {
                write!(
                    f,
                    "failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::GetPackage { path, reason } => {
                write!(
                    f,
                    "package metadata at {} is invalid: {}",
                    path.display(),
                    reason
                )
            }
            Self::InvalidHash { hash } => write!(f, "invalid package hash {:?}", hash),
            Self::Platform(e) => write!(f, "{}", e),
            Self::Cancelled => write!(f, "download cancelled"),
            Self::HashMismatch { expected, actual } => {
                write!(
                    f,
                    "package hash mismatch: expected {}, got {}",
                    expected, actual
                )
            }
            Self::SignatureInvalid { hash } => {
                write!(f, "signature verification failed for package {}", hash)
            }
            Self::EntryPointNotFound { file_name } => {
                write!(f, "entry point {} not found in package", file_name)
            }
            Self::AlreadyInstalled { hash } => {
                write!(f, "package {} is already installed", hash)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadFailed { source, .. } => Some(source),
            Self::WriteFailed { source, .. } => Some(source),
            Self::CreateDirFailed { source, .. } => Some(source),
            Self::Platform(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PlatformError> for StoreError {
    fn from(e: PlatformError) -> Self {
        match e {
            PlatformError::Cancelled => Self::Cancelled,
            other => Self::Platform(other),
        }
    }
}
