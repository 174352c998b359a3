//! Server-described package that has not been downloaded yet.

use std::ops::Deref;

use super::core::Package;

/// An update offered by the deployment service.
///
/// Uses composition to extend [`Package`] with the download location and the
/// locally-derived failed-install flag. The [`Deref`] implementation allows
/// transparent access to `Package` fields.
///
/// # Example
///
/// ```
/// use codedrop::package::{Package, RemotePackage};
///
/// let remote = RemotePackage::new(
///     Package::new("xyz", "1.0.0"),
///     "https://cdn.example.com/xyz.tar.gz",
/// );
///
/// assert_eq!(remote.package_hash, "xyz");
/// assert!(!remote.is_failed_install);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePackage {
    /// Core package identity (composition).
    pub package: Package,

    /// Where the payload can be fetched from.
    pub download_url: String,

    /// Whether this hash previously failed to start on this device.
    ///
    /// Looked up from the settings store at query time, never provided by the
    /// server.
    pub is_failed_install: bool,
}

impl RemotePackage {
    /// Create a remote package description.
    pub fn new(package: Package, download_url: impl Into<String>) -> Self {
        Self {
            package,
            download_url: download_url.into(),
            is_failed_install: false,
        }
    }

    /// Set the failed-install flag (builder pattern).
    pub fn with_failed_install(mut self, failed: bool) -> Self {
        self.is_failed_install = failed;
        self
    }
}

impl Deref for RemotePackage {
    type Target = Package;

    fn deref(&self) -> &Self::Target {
        &self.package
    }
}

impl AsRef<Package> for RemotePackage {
    fn as_ref(&self) -> &Package {
        &self.package
    }
}

impl From<RemotePackage> for Package {
    fn from(remote: RemotePackage) -> Self {
        remote.package
    }
}
