//! Host and platform collaborators.
//!
//! The updater never touches the network, archives or the host runtime
//! directly. It calls through the traits defined here, which hosts implement
//! (or take [`DefaultPlatformUtils`] for the filesystem/network side).
//!
//! | Trait                   | Role                                          |
//! |-------------------------|-----------------------------------------------|
//! | [`PlatformUtils`]       | download, unpack, diff, signature check       |
//! | [`EntryPointProvider`]  | names the file the host loads from a package  |
//! | [`ConfirmationDialog`]  | asks the user whether to take an update       |
//! | [`AppLoader`]           | reloads the host app with new content         |
//! | [`RestartListener`]     | observes reload outcomes                      |

mod default;
pub mod diff;
mod download;
mod error;
pub mod extract;
pub mod progress;
pub mod signature;

pub use default::DefaultPlatformUtils;
pub use download::HttpDownloader;
pub use error::{PlatformError, PlatformResult};
pub use progress::{ProgressCounters, ProgressReporter};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::package::RemotePackage;

/// Download progress `(received_bytes, total_bytes)`.
///
/// Delivery is fire-and-forget: intermediate values may be dropped.
pub type DownloadProgressCallback = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Filesystem and network primitives used by the package store.
pub trait PlatformUtils: Send + Sync {
    /// Download `url` to `destination`, returning the byte count.
    ///
    /// Must stop with [`PlatformError::Cancelled`] once `cancel` fires.
    fn download_file(
        &self,
        url: &str,
        destination: &Path,
        progress: &dyn Fn(u64, u64),
        cancel: &CancellationToken,
    ) -> PlatformResult<u64>;

    /// Unpack an archive into `destination`, returning the file count.
    fn unzip(&self, archive: &Path, destination: &Path) -> PlatformResult<usize>;

    /// Materialize `destination` as `base_dir` with the diff in `diff_dir` applied.
    fn apply_diff(
        &self,
        base_dir: Option<&Path>,
        diff_dir: &Path,
        destination: &Path,
    ) -> PlatformResult<()>;

    /// Whether the package in `package_dir` is signed over `content_hash`.
    fn is_valid_signature(&self, package_dir: &Path, content_hash: &str, public_key: &str) -> bool;
}

/// Tells the store and the host where a package's entry point lives.
pub trait EntryPointProvider: Send + Sync {
    /// File name searched for inside an unpacked package.
    fn entry_file_name(&self) -> String;

    /// Entry point of the binary version, loaded when no update is applied.
    fn binary_entry_point(&self) -> Option<PathBuf> {
        None
    }
}

/// An [`EntryPointProvider`] with a fixed file name.
#[derive(Debug, Clone)]
pub struct StaticEntryPoint {
    file_name: String,
    binary_entry_point: Option<PathBuf>,
}

impl StaticEntryPoint {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            binary_entry_point: None,
        }
    }

    /// Set the entry point shipped with the binary.
    pub fn with_binary_entry_point(mut self, path: impl Into<PathBuf>) -> Self {
        self.binary_entry_point = Some(path.into());
        self
    }
}

impl EntryPointProvider for StaticEntryPoint {
    fn entry_file_name(&self) -> String {
        self.file_name.clone()
    }

    fn binary_entry_point(&self) -> Option<PathBuf> {
        self.binary_entry_point.clone()
    }
}

/// User's answer to an update prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationDecision {
    /// Download and install now.
    Accept,
    /// Not now; offer again on the next check.
    Defer,
    /// Do not offer this package again for the rest of the session.
    Ignore,
}

/// Prompts the user about an available update.
///
/// `show` blocks the sync cycle until the user decides. Hosts with an
/// asynchronous UI block on their own channel inside the implementation.
pub trait ConfirmationDialog: Send + Sync {
    fn show(&self, package: &RemotePackage) -> ConfirmationDecision;
}

/// Reloads the host application.
pub trait AppLoader: Send + Sync {
    /// Load content from `entry_point`, or the binary version for `None`.
    fn load_app(&self, entry_point: Option<&Path>) -> PlatformResult<()>;
}

/// Observes the outcome of a reload.
pub trait RestartListener: Send + Sync {
    fn on_restart_finished(&self);

    fn on_restart_failed(&self, error: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_entry_point() {
        let provider = StaticEntryPoint::new("index.html").with_binary_entry_point("/app/index.html");
        assert_eq!(provider.entry_file_name(), "index.html");
        assert_eq!(
            provider.binary_entry_point(),
            Some(PathBuf::from("/app/index.html"))
        );
    }
}
