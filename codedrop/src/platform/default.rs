//! Stock [`PlatformUtils`] implementation.

use std::path::Path;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::diff;
use super::download::HttpDownloader;
use super::error::PlatformResult;
use super::extract;
use super::signature;
use super::PlatformUtils;

/// Platform utilities backed by reqwest, flate2/tar and ed25519-dalek.
#[derive(Debug, Clone)]
pub struct DefaultPlatformUtils {
    downloader: HttpDownloader,
}

impl DefaultPlatformUtils {
    pub fn new() -> PlatformResult<Self> {
        Ok(Self {
            downloader: HttpDownloader::new()?,
        })
    }

    /// Use a custom download timeout.
    pub fn with_timeout(timeout: Duration) -> PlatformResult<Self> {
        Ok(Self {
            downloader: HttpDownloader::with_timeout(timeout)?,
        })
    }
}

impl PlatformUtils for DefaultPlatformUtils {
    fn download_file(
        &self,
        url: &str,
        destination: &Path,
        progress: &dyn Fn(u64, u64),
        cancel: &CancellationToken,
    ) -> PlatformResult<u64> {
        self.downloader.download(url, destination, progress, cancel)
    }

    fn unzip(&self, archive: &Path, destination: &Path) -> PlatformResult<usize> {
        extract::extract_tar_gz(archive, destination)
    }

    fn apply_diff(
        &self,
        base_dir: Option<&Path>,
        diff_dir: &Path,
        destination: &Path,
    ) -> PlatformResult<()> {
        diff::apply_diff(base_dir, diff_dir, destination)
    }

    fn is_valid_signature(&self, package_dir: &Path, content_hash: &str, public_key: &str) -> bool {
        match signature::verify_package_signature(package_dir, content_hash, public_key) {
            Ok(()) => true,
            Err(e) => {
                warn!(dir = %package_dir.display(), error = %e, "Signature check failed");
                false
            }
        }
    }
}
