//! Filesystem implementation of the package store.
//!
//! Layout under the store root:
//!
//! ```text
//! packages/status.json        current/previous pointers (commit point)
//! packages/<hash>/app.json    slot metadata
//! packages/<hash>/content/    unpacked payload
//! download/                   staging, never referenced by a pointer
//! ```
//!
//! A slot is built completely under `download/`, renamed into `packages/`,
//! and only then made current by rewriting `status.json`. A crash anywhere
//! before that rewrite leaves the previous pointers, and therefore the old
//! current package, in effect.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::error::{StoreError, StoreResult};
use super::hash::{compute_content_hash, relative_key};
use super::slot::{
    read_json, write_json, SlotMetadata, SlotPointers, METADATA_FILENAME, STATUS_FILENAME,
};
use super::{DownloadResult, PackageStore, CONTENT_DIR};
use crate::package::{LocalPackage, RemotePackage};
use crate::platform::{diff, extract, PlatformUtils};

const PACKAGES_DIR: &str = "packages";
const DOWNLOAD_DIR: &str = "download";
const UNPACKED_DIR: &str = "unpacked";
const MERGED_DIR: &str = "merged";
const STAGED_SLOT_DIR: &str = "slot";

/// File name given to a non-archive payload when no entry point is known.
const DEFAULT_PAYLOAD_NAME: &str = "payload";

/// Package store rooted at a directory on disk.
///
/// Reads take a shared lock; the pointer swap, rollback, clear and garbage
/// collection take it exclusively. Downloading and unpacking run unlocked.
pub struct FilePackageStore {
    root: PathBuf,
    platform: Arc<dyn PlatformUtils>,
    public_key: Option<String>,
    promotion: RwLock<()>,
}

impl FilePackageStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>, platform: Arc<dyn PlatformUtils>) -> Self {
        Self {
            root: root.into(),
            platform,
            public_key: None,
            promotion: RwLock::new(()),
        }
    }

    /// Require packages to verify against this hex ed25519 public key.
    pub fn with_public_key(mut self, public_key: Option<String>) -> Self {
        self.public_key = public_key;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn packages_dir(&self) -> PathBuf {
        self.root.join(PACKAGES_DIR)
    }

    fn download_dir(&self) -> PathBuf {
        self.root.join(DOWNLOAD_DIR)
    }

    fn status_path(&self) -> PathBuf {
        self.packages_dir().join(STATUS_FILENAME)
    }

    fn load_pointers(&self) -> StoreResult<SlotPointers> {
        Ok(read_json(&self.status_path())?.unwrap_or_default())
    }

    fn read_slot(&self, hash: &str) -> StoreResult<Option<LocalPackage>> {
        validate_hash(hash)?;
        let path = self.package_folder(hash).join(METADATA_FILENAME);
        let Some(metadata) = read_json::<SlotMetadata>(&path)? else {
            return Ok(None);
        };

        if metadata.package.package_hash != hash {
            return Err(StoreError::GetPackage {
                path,
                reason: format!(
                    "metadata describes {} but slot is {}",
                    metadata.package.package_hash, hash
                ),
            });
        }
        Ok(Some(metadata.into()))
    }

    /// Resolve a pointer. A pointer to a missing slot is corruption, not absence.
    fn read_pointed(&self, hash: Option<&str>) -> StoreResult<Option<LocalPackage>> {
        let Some(hash) = hash else {
            return Ok(None);
        };

        self.read_slot(hash)?
            .map(Some)
            .ok_or_else(|| StoreError::GetPackage {
                path: self.package_folder(hash).join(METADATA_FILENAME),
                reason: format!("slot {} is referenced but missing", hash),
            })
    }

    fn stage_payload(
        &self,
        download: &DownloadResult,
        entry_hint: Option<&str>,
    ) -> StoreResult<PathBuf> {
        let unpacked = self.download_dir().join(UNPACKED_DIR);
        reset_dir(&unpacked)?;

        if download.is_archive {
            let count = self.platform.unzip(&download.file, &unpacked)?;
            debug!(files = count, "Unpacked package archive");
        } else {
            let target = unpacked.join(entry_hint.unwrap_or(DEFAULT_PAYLOAD_NAME));
            fs::copy(&download.file, &target).map_err(|e| StoreError::WriteFailed {
                path: target.clone(),
                source: e,
            })?;
        }

        if !diff::is_diff_payload(&unpacked) {
            return Ok(unpacked);
        }

        let base = {
            let _guard = self.promotion.read();
            let pointers = self.load_pointers()?;
            pointers
                .current
                .as_deref()
                .map(|hash| self.package_folder(hash).join(CONTENT_DIR))
        };
        let merged = self.download_dir().join(MERGED_DIR);
        remove_if_exists(&merged)?;
        self.platform.apply_diff(base.as_deref(), &unpacked, &merged)?;
        debug!(base = ?base, "Applied diff package");
        Ok(merged)
    }

    fn verify(&self, content: &Path, expected_hash: &str) -> StoreResult<()> {
        let Some(public_key) = self.public_key.as_deref() else {
            return Ok(());
        };

        let actual = compute_content_hash(content)?;
        if actual != expected_hash {
            return Err(StoreError::HashMismatch {
                expected: expected_hash.to_string(),
                actual,
            });
        }

        if !self
            .platform
            .is_valid_signature(content, expected_hash, public_key)
        {
            return Err(StoreError::SignatureInvalid {
                hash: expected_hash.to_string(),
            });
        }

        debug!(hash = %expected_hash, "Package signature verified");
        Ok(())
    }

    /// Move the staged slot into place and swap the pointers.
    fn promote(&self, hash: &str, staged: &Path) -> StoreResult<()> {
        let _guard = self.promotion.write();
        let pointers = self.load_pointers()?;

        if pointers.current.as_deref() == Some(hash) {
            return Err(StoreError::AlreadyInstalled {
                hash: hash.to_string(),
            });
        }

        let slot = self.package_folder(hash);
        if pointers.previous.as_deref() == Some(hash) && slot.join(METADATA_FILENAME).is_file() {
            debug!(hash = %hash, "Reusing slot of previous package");
        } else {
            remove_if_exists(&slot)?;
            create_dir(&self.packages_dir())?;
            fs::rename(staged, &slot).map_err(|e| StoreError::WriteFailed {
                path: slot.clone(),
                source: e,
            })?;
        }

        let updated = SlotPointers {
            current: Some(hash.to_string()),
            previous: pointers.current,
        };
        write_json(&self.status_path(), &updated)?;

        info!(
            current = %hash,
            previous = ?updated.previous,
            "Promoted package to current"
        );
        Ok(())
    }

    /// Delete slots no pointer references, and the staging area.
    fn collect_garbage(&self) {
        let _guard = self.promotion.write();

        let pointers = match self.load_pointers() {
            Ok(pointers) => pointers,
            Err(e) => {
                warn!(error = %e, "Skipping package garbage collection");
                return;
            }
        };

        if let Ok(entries) = fs::read_dir(self.packages_dir()) {
            for entry in entries.flatten() {
                let path = entry.path();
                let name = entry.file_name().to_string_lossy().to_string();
                if !path.is_dir() || pointers.references(&name) {
                    continue;
                }
                match fs::remove_dir_all(&path) {
                    Ok(()) => debug!(hash = %name, "Removed unreferenced package slot"),
                    Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove slot"),
                }
            }
        }

        if let Err(e) = remove_if_exists(&self.download_dir()) {
            warn!(error = %e, "Failed to clean download staging");
        }
    }
}

impl PackageStore for FilePackageStore {
    fn current_package(&self) -> StoreResult<Option<LocalPackage>> {
        let _guard = self.promotion.read();
        let pointers = self.load_pointers()?;
        self.read_pointed(pointers.current.as_deref())
    }

    fn previous_package(&self) -> StoreResult<Option<LocalPackage>> {
        let _guard = self.promotion.read();
        let pointers = self.load_pointers()?;
        self.read_pointed(pointers.previous.as_deref())
    }

    fn package(&self, hash: &str) -> StoreResult<Option<LocalPackage>> {
        let _guard = self.promotion.read();
        self.read_slot(hash)
    }

    fn download_package(
        &self,
        package: &RemotePackage,
        progress: &dyn Fn(u64, u64),
        cancel: &CancellationToken,
    ) -> StoreResult<DownloadResult> {
        validate_hash(&package.package_hash)?;

        let download_dir = self.download_dir();
        reset_dir(&download_dir)?;
        let file = download_dir.join(format!("{}.download", package.package_hash));

        info!(
            hash = %package.package_hash,
            url = %package.download_url,
            "Downloading package"
        );
        let bytes = match self
            .platform
            .download_file(&package.download_url, &file, progress, cancel)
        {
            Ok(bytes) => bytes,
            Err(e) => {
                if let Err(cleanup) = remove_if_exists(&download_dir) {
                    warn!(error = %cleanup, "Failed to discard partial download");
                }
                return Err(e.into());
            }
        };

        let is_archive = extract::is_gzip_archive(&file)?;
        debug!(bytes, is_archive, "Download complete");
        Ok(DownloadResult { file, is_archive })
    }

    fn install_package(
        &self,
        download: &DownloadResult,
        package: &RemotePackage,
        entry_hint: Option<&str>,
    ) -> StoreResult<LocalPackage> {
        let hash = package.package_hash.as_str();
        validate_hash(hash)?;

        let content = self.stage_payload(download, entry_hint)?;
        self.verify(&content, hash)?;

        let entry_point = match entry_hint {
            Some(name) => Some(find_entry_point(&content, name)?.ok_or_else(|| {
                StoreError::EntryPointNotFound {
                    file_name: name.to_string(),
                }
            })?),
            None => None,
        };

        let staged = self.download_dir().join(STAGED_SLOT_DIR);
        reset_dir(&staged)?;
        let staged_content = staged.join(CONTENT_DIR);
        fs::rename(&content, &staged_content).map_err(|e| StoreError::WriteFailed {
            path: staged_content,
            source: e,
        })?;

        let metadata = SlotMetadata {
            package: package.package.clone(),
            entry_point,
        };
        write_json(&staged.join(METADATA_FILENAME), &metadata)?;

        self.promote(hash, &staged)?;
        self.collect_garbage();

        Ok(metadata.into())
    }

    fn discard_download(&self, download: &DownloadResult) -> StoreResult<()> {
        let _guard = self.promotion.read();
        debug!(file = %download.file.display(), "Discarding staged download");
        remove_if_exists(&self.download_dir())
    }

    fn rollback_package(&self) -> StoreResult<Option<LocalPackage>> {
        let _guard = self.promotion.write();
        let pointers = self.load_pointers()?;

        let Some(failed) = pointers.current else {
            debug!("Nothing to roll back");
            return Ok(None);
        };

        let updated = SlotPointers {
            current: pointers.previous,
            previous: None,
        };
        write_json(&self.status_path(), &updated)?;
        warn!(failed = %failed, restored = ?updated.current, "Rolled back package");

        if let Err(e) = remove_if_exists(&self.package_folder(&failed)) {
            warn!(error = %e, "Failed to remove rolled back slot");
        }

        self.read_pointed(updated.current.as_deref())
    }

    fn clear_updates(&self) -> StoreResult<()> {
        let _guard = self.promotion.write();
        remove_if_exists(&self.packages_dir())?;
        remove_if_exists(&self.download_dir())?;
        info!(root = %self.root.display(), "Cleared all updates");
        Ok(())
    }

    fn package_folder(&self, hash: &str) -> PathBuf {
        self.packages_dir().join(hash)
    }
}

/// Hashes name directories, so they are restricted to a safe alphabet.
fn validate_hash(hash: &str) -> StoreResult<()> {
    if hash.is_empty()
        || !hash
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(StoreError::InvalidHash {
            hash: hash.to_string(),
        });
    }
    Ok(())
}

/// Locate `file_name` under `content`, preferring shallower matches.
fn find_entry_point(content: &Path, file_name: &str) -> StoreResult<Option<String>> {
    let mut pending = vec![content.to_path_buf()];

    while !pending.is_empty() {
        let mut next = Vec::new();
        for dir in pending {
            let mut entries: Vec<_> = fs::read_dir(&dir)
                .map_err(|e| StoreError::ReadFailed {
                    path: dir.clone(),
                    source: e,
                })?
                .flatten()
                .map(|entry| entry.path())
                .collect();
            entries.sort();

            for path in entries {
                if path.is_dir() {
                    next.push(path);
                } else if path.file_name().is_some_and(|name| name == file_name) {
                    return Ok(Some(relative_key(content, &path)));
                }
            }
        }
        pending = next;
    }

    Ok(None)
}

fn create_dir(path: &Path) -> StoreResult<()> {
    fs::create_dir_all(path).map_err(|e| StoreError::CreateDirFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

fn reset_dir(path: &Path) -> StoreResult<()> {
    remove_if_exists(path)?;
    create_dir(path)
}

fn remove_if_exists(path: &Path) -> StoreResult<()> {
    let result = if path.is_dir() {
        fs::remove_dir_all(path)
    } else if path.exists() {
        fs::remove_file(path)
    } else {
        return Ok(());
    };

    result.map_err(|e| StoreError::WriteFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::Package;
    use crate::platform::extract::tests::write_tar_gz;
    use crate::platform::signature::tests::{public_key_hex, sign_into};
    use crate::platform::{DefaultPlatformUtils, PlatformError, PlatformResult};
    use tempfile::TempDir;

    /// Treats download URLs as local file paths.
    struct LocalPlatform {
        inner: DefaultPlatformUtils,
    }

    impl PlatformUtils for LocalPlatform {
        fn download_file(
            &self,
            url: &str,
            destination: &Path,
            progress: &dyn Fn(u64, u64),
            cancel: &CancellationToken,
        ) -> PlatformResult<u64> {
            if cancel.is_cancelled() {
                fs::write(destination, "partial").unwrap();
                return Err(PlatformError::Cancelled);
            }
            let bytes = fs::copy(url, destination).map_err(|e| PlatformError::io(url, e))?;
            progress(bytes, bytes);
            Ok(bytes)
        }

        fn unzip(&self, archive: &Path, destination: &Path) -> PlatformResult<usize> {
            self.inner.unzip(archive, destination)
        }

        fn apply_diff(
            &self,
            base_dir: Option<&Path>,
            diff_dir: &Path,
            destination: &Path,
        ) -> PlatformResult<()> {
            self.inner.apply_diff(base_dir, diff_dir, destination)
        }

        fn is_valid_signature(&self, dir: &Path, hash: &str, key: &str) -> bool {
            self.inner.is_valid_signature(dir, hash, key)
        }
    }

    struct Fixture {
        temp: TempDir,
        store: FilePackageStore,
    }

    fn fixture() -> Fixture {
        let temp = TempDir::new().unwrap();
        let platform = Arc::new(LocalPlatform {
            inner: DefaultPlatformUtils::new().unwrap(),
        });
        let store = FilePackageStore::new(temp.path().join("codedrop"), platform);
        Fixture { temp, store }
    }

    impl Fixture {
        fn remote(&self, hash: &str, files: &[(&str, &str)]) -> RemotePackage {
            let archive = self.temp.path().join(format!("{}.tar.gz", hash));
            write_tar_gz(&archive, files);
            RemotePackage::new(
                Package::new(hash, "1.0.0").with_label(format!("v-{}", hash)),
                archive.to_string_lossy(),
            )
        }

        fn install(&self, hash: &str) -> LocalPackage {
            let remote = self.remote(hash, &[("index.html", hash)]);
            let download = self
                .store
                .download_package(&remote, &|_, _| {}, &CancellationToken::new())
                .unwrap();
            self.store
                .install_package(&download, &remote, Some("index.html"))
                .unwrap()
        }
    }

    #[test]
    fn test_empty_store_has_no_packages() {
        let f = fixture();
        assert!(f.store.current_package().unwrap().is_none());
        assert!(f.store.previous_package().unwrap().is_none());
    }

    #[test]
    fn test_install_promotes_and_demotes() {
        let f = fixture();
        f.install("aaa");
        let installed = f.install("bbb");

        assert_eq!(installed.entry_point.as_deref(), Some("index.html"));
        assert_eq!(
            f.store.current_package().unwrap().unwrap().package_hash,
            "bbb"
        );
        assert_eq!(
            f.store.previous_package().unwrap().unwrap().package_hash,
            "aaa"
        );
        let entry = f.store.package_folder("bbb").join(CONTENT_DIR).join("index.html");
        assert_eq!(fs::read(entry).unwrap(), b"bbb");
    }

    #[test]
    fn test_unreferenced_slots_are_collected() {
        let f = fixture();
        f.install("aaa");
        f.install("bbb");
        f.install("ccc");

        assert!(!f.store.package_folder("aaa").exists());
        assert!(f.store.package_folder("bbb").exists());
        assert!(f.store.package_folder("ccc").exists());
        assert!(!f.store.root().join(DOWNLOAD_DIR).exists());
    }

    #[test]
    fn test_download_failure_leaves_current() {
        let f = fixture();
        f.install("aaa");

        let missing = RemotePackage::new(Package::new("bbb", "1.0.0"), "/nonexistent/payload");
        let result = f
            .store
            .download_package(&missing, &|_, _| {}, &CancellationToken::new());
        assert!(matches!(result, Err(StoreError::Platform(_))));
        assert_eq!(
            f.store.current_package().unwrap().unwrap().package_hash,
            "aaa"
        );
    }

    #[test]
    fn test_cancelled_download_discards_partial_file() {
        let f = fixture();
        let remote = f.remote("bbb", &[("index.html", "x")]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = f.store.download_package(&remote, &|_, _| {}, &cancel);
        assert!(matches!(result, Err(StoreError::Cancelled)));
        assert!(!f.store.root().join(DOWNLOAD_DIR).exists());
        assert!(f.store.current_package().unwrap().is_none());
    }

    #[test]
    fn test_discard_download_removes_staging() {
        let f = fixture();
        f.install("aaa");
        let remote = f.remote("bbb", &[("index.html", "bbb")]);
        let download = f
            .store
            .download_package(&remote, &|_, _| {}, &CancellationToken::new())
            .unwrap();
        assert!(download.file.exists());

        f.store.discard_download(&download).unwrap();

        assert!(!f.store.root().join(DOWNLOAD_DIR).exists());
        assert_eq!(
            f.store.current_package().unwrap().unwrap().package_hash,
            "aaa"
        );
    }

    #[test]
    fn test_plain_payload_is_copied_under_entry_name() {
        let f = fixture();
        let payload = f.temp.path().join("bundle.js");
        fs::write(&payload, "main()").unwrap();
        let remote = RemotePackage::new(Package::new("js1", "1.0.0"), payload.to_string_lossy());

        let download = f
            .store
            .download_package(&remote, &|_, _| {}, &CancellationToken::new())
            .unwrap();
        assert!(!download.is_archive);

        let installed = f
            .store
            .install_package(&download, &remote, Some("main.js"))
            .unwrap();
        assert_eq!(installed.entry_point.as_deref(), Some("main.js"));
    }

    #[test]
    fn test_missing_entry_point_aborts_before_promotion() {
        let f = fixture();
        f.install("aaa");
        let remote = f.remote("bbb", &[("other.html", "x")]);
        let download = f
            .store
            .download_package(&remote, &|_, _| {}, &CancellationToken::new())
            .unwrap();

        let result = f.store.install_package(&download, &remote, Some("index.html"));
        assert!(matches!(result, Err(StoreError::EntryPointNotFound { .. })));
        assert_eq!(
            f.store.current_package().unwrap().unwrap().package_hash,
            "aaa"
        );
    }

    #[test]
    fn test_entry_point_found_in_subdirectory() {
        let f = fixture();
        let remote = f.remote("nested", &[("www/index.html", "x"), ("readme.txt", "y")]);
        let download = f
            .store
            .download_package(&remote, &|_, _| {}, &CancellationToken::new())
            .unwrap();
        let installed = f
            .store
            .install_package(&download, &remote, Some("index.html"))
            .unwrap();
        assert_eq!(installed.entry_point.as_deref(), Some("www/index.html"));
    }

    #[test]
    fn test_reinstalling_current_is_rejected() {
        let f = fixture();
        f.install("aaa");
        let remote = f.remote("aaa", &[("index.html", "aaa")]);
        let download = f
            .store
            .download_package(&remote, &|_, _| {}, &CancellationToken::new())
            .unwrap();
        let result = f.store.install_package(&download, &remote, None);
        assert!(matches!(result, Err(StoreError::AlreadyInstalled { .. })));
    }

    #[test]
    fn test_rollback_restores_previous() {
        let f = fixture();
        f.install("aaa");
        f.install("bbb");

        let restored = f.store.rollback_package().unwrap().unwrap();
        assert_eq!(restored.package_hash, "aaa");
        assert!(f.store.previous_package().unwrap().is_none());
        assert!(!f.store.package_folder("bbb").exists());

        // Rolling back the first update returns to the binary version.
        assert!(f.store.rollback_package().unwrap().is_none());
        assert!(f.store.current_package().unwrap().is_none());
    }

    #[test]
    fn test_clear_updates() {
        let f = fixture();
        f.install("aaa");
        f.store.clear_updates().unwrap();
        assert!(f.store.current_package().unwrap().is_none());
        assert!(!f.store.package_folder("aaa").exists());
    }

    #[test]
    fn test_corrupt_metadata_is_get_package_error() {
        let f = fixture();
        f.install("aaa");
        fs::write(
            f.store.package_folder("aaa").join(METADATA_FILENAME),
            "not json",
        )
        .unwrap();

        assert!(matches!(
            f.store.current_package(),
            Err(StoreError::GetPackage { .. })
        ));
    }

    #[test]
    fn test_dangling_pointer_is_get_package_error() {
        let f = fixture();
        f.install("aaa");
        fs::remove_dir_all(f.store.package_folder("aaa")).unwrap();

        assert!(matches!(
            f.store.current_package(),
            Err(StoreError::GetPackage { .. })
        ));
        assert!(f.store.package("aaa").unwrap().is_none());
    }

    #[test]
    fn test_invalid_hash_rejected() {
        let f = fixture();
        let remote = RemotePackage::new(Package::new("../escape", "1.0.0"), "/tmp/x");
        let result = f
            .store
            .download_package(&remote, &|_, _| {}, &CancellationToken::new());
        assert!(matches!(result, Err(StoreError::InvalidHash { .. })));
    }

    #[test]
    fn test_diff_package_applies_over_current() {
        let f = fixture();
        let base = f.remote("base", &[("index.html", "v1"), ("old.js", "old")]);
        let download = f
            .store
            .download_package(&base, &|_, _| {}, &CancellationToken::new())
            .unwrap();
        f.store.install_package(&download, &base, None).unwrap();

        let patch = f.remote(
            "patch",
            &[
                ("index.html", "v2"),
                (diff::DIFF_MANIFEST_FILENAME, r#"{"deletedFiles":["old.js"]}"#),
            ],
        );
        let download = f
            .store
            .download_package(&patch, &|_, _| {}, &CancellationToken::new())
            .unwrap();
        f.store.install_package(&download, &patch, None).unwrap();

        let content = f.store.package_folder("patch").join(CONTENT_DIR);
        assert_eq!(fs::read(content.join("index.html")).unwrap(), b"v2");
        assert!(!content.join("old.js").exists());
        assert!(f.store.package_folder("base").join(CONTENT_DIR).join("old.js").exists());
    }

    #[test]
    fn test_signed_package_verification() {
        let f = fixture();
        let store = FilePackageStore::new(
            f.temp.path().join("signed"),
            Arc::new(LocalPlatform {
                inner: DefaultPlatformUtils::new().unwrap(),
            }),
        )
        .with_public_key(Some(public_key_hex()));

        // Compute the real content hash, then sign over it.
        let probe = f.temp.path().join("probe");
        fs::create_dir_all(&probe).unwrap();
        fs::write(probe.join("index.html"), "signed").unwrap();
        let hash = compute_content_hash(&probe).unwrap();
        sign_into(&probe, &hash);
        let signature =
            fs::read_to_string(probe.join(crate::platform::signature::SIGNATURE_FILENAME)).unwrap();

        let good = f.remote(
            &hash,
            &[
                ("index.html", "signed"),
                (crate::platform::signature::SIGNATURE_FILENAME, signature.as_str()),
            ],
        );
        let download = store
            .download_package(&good, &|_, _| {}, &CancellationToken::new())
            .unwrap();
        store.install_package(&download, &good, None).unwrap();

        let tampered = f.remote(&hash[..10], &[("index.html", "tampered")]);
        let download = store
            .download_package(&tampered, &|_, _| {}, &CancellationToken::new())
            .unwrap();
        assert!(matches!(
            store.install_package(&download, &tampered, None),
            Err(StoreError::HashMismatch { .. })
        ));
        assert_eq!(
            store.current_package().unwrap().unwrap().package_hash,
            hash
        );
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(8))]

            #[test]
            fn prop_previous_is_prior_current(
                hashes in proptest::collection::vec("[a-f0-9]{6}", 2..5)
            ) {
                let f = fixture();
                let mut expected_current: Option<String> = None;

                for hash in &hashes {
                    if expected_current.as_deref() == Some(hash.as_str()) {
                        continue;
                    }
                    f.install(hash);
                    let previous = f.store.previous_package().unwrap().map(|p| p.package_hash.clone());
                    prop_assert_eq!(previous, expected_current.clone());
                    expected_current = Some(hash.clone());
                }
            }
        }
    }
}
