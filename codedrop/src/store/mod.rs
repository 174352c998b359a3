//! Package store: versioned on-disk slots with current/previous pointers.
//!
//! The store keeps at most two installed packages alive: the **current**
//! package and the **previous** one kept for rollback. Installing a package
//! is a two-phase operation:
//!
//! 1. [`PackageStore::download_package`] streams the payload into an isolated
//!    staging area.
//! 2. [`PackageStore::install_package`] unpacks it into a new slot and, as the
//!    final step, atomically repoints "current" at it.
//!
//! Slots referenced by neither pointer are garbage-collected after each
//! successful install.

mod error;
mod file;
pub mod hash;
mod slot;

pub use error::{StoreError, StoreResult};
pub use file::FilePackageStore;
pub use slot::{SlotMetadata, SlotPointers, METADATA_FILENAME, STATUS_FILENAME};

use std::path::PathBuf;

use tokio_util::sync::CancellationToken;

use crate::package::{LocalPackage, RemotePackage};

/// Directory inside a slot holding the unpacked payload.
pub const CONTENT_DIR: &str = "content";

/// A payload downloaded into staging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    /// Staged payload file.
    pub file: PathBuf,
    /// Whether the payload is an archive to unpack rather than a single file.
    pub is_archive: bool,
}

/// On-disk package versioning.
///
/// `Ok(None)` always means "no package" (the binary version is running);
/// unreadable metadata is reported as [`StoreError::GetPackage`].
pub trait PackageStore: Send + Sync {
    /// The package currently considered active.
    fn current_package(&self) -> StoreResult<Option<LocalPackage>>;

    /// The package active before the current one.
    fn previous_package(&self) -> StoreResult<Option<LocalPackage>>;

    /// Any installed package by hash.
    fn package(&self, hash: &str) -> StoreResult<Option<LocalPackage>>;

    /// Stream a remote payload into staging.
    ///
    /// A failed or cancelled download discards the partial file and leaves
    /// installed packages untouched.
    fn download_package(
        &self,
        package: &RemotePackage,
        progress: &dyn Fn(u64, u64),
        cancel: &CancellationToken,
    ) -> StoreResult<DownloadResult>;

    /// Unpack a staged payload into a new slot and make it current.
    ///
    /// `entry_hint` names the entry file to locate inside the package.
    fn install_package(
        &self,
        download: &DownloadResult,
        package: &RemotePackage,
        entry_hint: Option<&str>,
    ) -> StoreResult<LocalPackage>;

    /// Drop a staged payload that will not be installed.
    fn discard_download(&self, download: &DownloadResult) -> StoreResult<()>;

    /// Make the previous package current again, returning it.
    fn rollback_package(&self) -> StoreResult<Option<LocalPackage>>;

    /// Remove every installed package.
    fn clear_updates(&self) -> StoreResult<()>;

    /// Slot directory for `hash`.
    fn package_folder(&self, hash: &str) -> PathBuf;

    /// Absolute path of a package's entry file, if it has one.
    fn entry_point_path(&self, package: &LocalPackage) -> Option<PathBuf> {
        package.entry_point.as_ref().map(|entry| {
            self.package_folder(&package.package_hash)
                .join(CONTENT_DIR)
                .join(entry)
        })
    }
}
