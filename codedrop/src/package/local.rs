//! Package unpacked on disk, with status flags derived at query time.

use std::ops::Deref;

use super::core::Package;

/// An installed package.
///
/// Uses composition to extend [`Package`] with its on-disk entry point and the
/// status flags the updater derives from the settings store. None of the
/// flags are stored in the package's own metadata file: they are recomputed
/// every time the package is queried.
///
/// # Example
///
/// ```
/// use codedrop::package::{LocalPackage, Package};
///
/// let local = LocalPackage::new(Package::new("abc", "1.0.0"))
///     .with_pending(true)
///     .with_first_run(false);
///
/// assert_eq!(local.package_hash, "abc");
/// assert!(local.is_pending);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalPackage {
    /// Core package identity (composition).
    pub package: Package,

    /// Entry point relative to the package content directory, if the host
    /// runtime loads a specific file.
    pub entry_point: Option<String>,

    /// Installed but not yet confirmed running.
    pub is_pending: bool,

    /// First launch of this package in the current process.
    pub is_first_run: bool,

    /// This hash previously crashed before confirming itself.
    pub is_failed_install: bool,

    /// The process is running the binary build rather than an update.
    pub is_debug_only: bool,
}

impl LocalPackage {
    /// Wrap a package with all status flags cleared.
    pub fn new(package: Package) -> Self {
        Self {
            package,
            entry_point: None,
            is_pending: false,
            is_first_run: false,
            is_failed_install: false,
            is_debug_only: false,
        }
    }

    /// Baseline describing the binary build, used as the "current package"
    /// when querying the server before any update has been applied.
    pub fn binary_baseline(app_version: impl Into<String>) -> Self {
        Self::new(Package::new("", app_version))
    }

    /// Set the relative entry point.
    pub fn with_entry_point(mut self, entry_point: Option<String>) -> Self {
        self.entry_point = entry_point;
        self
    }

    /// Set the pending flag.
    pub fn with_pending(mut self, pending: bool) -> Self {
        self.is_pending = pending;
        self
    }

    /// Set the first-run flag.
    pub fn with_first_run(mut self, first_run: bool) -> Self {
        self.is_first_run = first_run;
        self
    }

    /// Set the failed-install flag.
    pub fn with_failed_install(mut self, failed: bool) -> Self {
        self.is_failed_install = failed;
        self
    }

    /// Set the debug-only flag.
    pub fn with_debug_only(mut self, debug_only: bool) -> Self {
        self.is_debug_only = debug_only;
        self
    }
}

impl Deref for LocalPackage {
    type Target = Package;

    fn deref(&self) -> &Self::Target {
        &self.package
    }
}

impl AsRef<Package> for LocalPackage {
    fn as_ref(&self) -> &Package {
        &self.package
    }
}

impl From<LocalPackage> for Package {
    fn from(local: LocalPackage) -> Self {
        local.package
    }
}
