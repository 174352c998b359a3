//! JSON file implementation of the settings store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::error::{SettingsError, SettingsResult};
use super::record::{PendingUpdate, SettingsRecord};
use super::SettingsStore;
use crate::package::StatusReport;
use crate::persist::save_json_atomic;

/// File name of the settings record inside the updater directory.
pub const SETTINGS_FILENAME: &str = "settings.json";

/// Settings store backed by a single JSON file.
///
/// Every call reads the record from disk, so a record corrupted by another
/// process is noticed on the next access. Mutations hold an in-process lock
/// across the read-modify-write and replace the file atomically.
pub struct FileSettingsStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSettingsStore {
    /// Create a store persisting to `<directory>/settings.json`.
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self::at_path(directory.as_ref().join(SETTINGS_FILENAME))
    }

    /// Create a store persisting to an explicit file path.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record. A missing file is an empty record.
    pub fn load(&self) -> SettingsResult<SettingsRecord> {
        let _guard = self.lock.lock();
        self.read_record()
    }

    fn read_record(&self) -> SettingsResult<SettingsRecord> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(SettingsRecord::default());
            }
            Err(e) => {
                return Err(SettingsError::ReadFailed {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        serde_json::from_str(&contents).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "Settings record is malformed");
            SettingsError::MalformedData {
                path: self.path.clone(),
                reason: e.to_string(),
            }
        })
    }

    fn update<F>(&self, mutate: F) -> SettingsResult<()>
    where
        F: FnOnce(&mut SettingsRecord),
    {
        let _guard = self.lock.lock();
        let mut record = self.read_record()?;
        mutate(&mut record);
        save_json_atomic(&self.path, &record).map_err(|e| SettingsError::WriteFailed {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl SettingsStore for FileSettingsStore {
    fn is_pending_update(&self, hash: &str) -> SettingsResult<bool> {
        Ok(self
            .load()?
            .pending_update
            .is_some_and(|pending| pending.hash == hash))
    }

    fn pending_update(&self) -> SettingsResult<Option<PendingUpdate>> {
        Ok(self.load()?.pending_update)
    }

    fn save_pending_update(&self, hash: &str) -> SettingsResult<()> {
        debug!(hash = %hash, "Saving pending update");
        self.update(|record| record.pending_update = Some(PendingUpdate::new(hash)))
    }

    fn mark_pending_loading(&self) -> SettingsResult<()> {
        let _guard = self.lock.lock();
        let mut record = self.read_record()?;
        let pending = record
            .pending_update
            .as_mut()
            .ok_or(SettingsError::NoPendingUpdate)?;
        pending.is_loading = true;
        save_json_atomic(&self.path, &record).map_err(|e| SettingsError::WriteFailed {
            path: self.path.clone(),
            source: e,
        })
    }

    fn remove_pending_update(&self) -> SettingsResult<()> {
        self.update(|record| record.pending_update = None)
    }

    fn mark_failed(&self, hash: &str) -> SettingsResult<()> {
        warn!(hash = %hash, "Marking update as failed");
        let hash = hash.to_string();
        self.update(|record| {
            record.failed_hashes.insert(hash);
        })
    }

    fn is_failed(&self, hash: &str) -> SettingsResult<bool> {
        Ok(self.load()?.failed_hashes.contains(hash))
    }

    fn clear_failed(&self) -> SettingsResult<()> {
        self.update(|record| record.failed_hashes.clear())
    }

    fn save_retry_status_report(&self, report: &StatusReport) -> SettingsResult<()> {
        let report = report.clone();
        self.update(|record| record.retry_status_report = Some(report))
    }

    fn retry_status_report(&self) -> SettingsResult<Option<StatusReport>> {
        Ok(self.load()?.retry_status_report)
    }

    fn remove_retry_status_report(&self) -> SettingsResult<()> {
        self.update(|record| record.retry_status_report = None)
    }

    fn last_deployment_report(&self) -> SettingsResult<Option<String>> {
        Ok(self.load()?.last_deployment_report)
    }

    fn save_last_deployment_report(&self, identifier: &str) -> SettingsResult<()> {
        let identifier = identifier.to_string();
        self.update(|record| record.last_deployment_report = Some(identifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::Package;
    use tempfile::TempDir;

    fn store() -> (TempDir, FileSettingsStore) {
        let temp = TempDir::new().unwrap();
        let store = FileSettingsStore::new(temp.path());
        (temp, store)
    }

    #[test]
    fn test_missing_file_is_empty_record() {
        let (_temp, store) = store();
        assert!(!store.is_pending_update("abc").unwrap());
        assert!(store.pending_update().unwrap().is_none());
        assert!(!store.is_failed("abc").unwrap());
    }

    #[test]
    fn test_pending_update_lifecycle() {
        let (_temp, store) = store();

        store.save_pending_update("abc").unwrap();
        assert!(store.is_pending_update("abc").unwrap());
        assert!(!store.is_pending_update("xyz").unwrap());

        store.mark_pending_loading().unwrap();
        assert!(store.pending_update().unwrap().unwrap().is_loading);

        store.remove_pending_update().unwrap();
        assert!(!store.is_pending_update("abc").unwrap());
    }

    #[test]
    fn test_mark_loading_without_pending() {
        let (_temp, store) = store();
        assert!(matches!(
            store.mark_pending_loading(),
            Err(SettingsError::NoPendingUpdate)
        ));
    }

    #[test]
    fn test_failed_set_persists_across_instances() {
        let temp = TempDir::new().unwrap();
        FileSettingsStore::new(temp.path()).mark_failed("bad").unwrap();

        let reopened = FileSettingsStore::new(temp.path());
        assert!(reopened.is_failed("bad").unwrap());

        reopened.clear_failed().unwrap();
        assert!(!reopened.is_failed("bad").unwrap());
    }

    #[test]
    fn test_malformed_record_is_surfaced() {
        let (_temp, store) = store();
        fs::write(store.path(), "{ not json").unwrap();

        assert!(matches!(
            store.is_pending_update("abc"),
            Err(SettingsError::MalformedData { .. })
        ));
        assert!(matches!(
            store.save_pending_update("abc"),
            Err(SettingsError::MalformedData { .. })
        ));
        // The corrupt file is left alone.
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "{ not json");
    }

    #[test]
    fn test_retry_report_round_trip() {
        let (_temp, store) = store();
        let report = StatusReport::failed(Package::new("h", "1.0.0").with_label("v2"));

        store.save_retry_status_report(&report).unwrap();
        assert_eq!(store.retry_status_report().unwrap(), Some(report));

        store.remove_retry_status_report().unwrap();
        assert!(store.retry_status_report().unwrap().is_none());
    }

    #[test]
    fn test_last_deployment_report() {
        let (_temp, store) = store();
        assert!(store.last_deployment_report().unwrap().is_none());
        store.save_last_deployment_report("prod:v3").unwrap();
        assert_eq!(
            store.last_deployment_report().unwrap().as_deref(),
            Some("prod:v3")
        );
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn prop_pending_after_save_and_not_after_remove(hash in "[a-f0-9]{1,64}") {
                let (_temp, store) = store();

                store.save_pending_update(&hash).unwrap();
                prop_assert!(store.is_pending_update(&hash).unwrap());

                store.remove_pending_update().unwrap();
                prop_assert!(!store.is_pending_update(&hash).unwrap());
            }

            #[test]
            fn prop_failed_hash_stays_failed(
                failed in "[a-f0-9]{8}",
                others in proptest::collection::vec("[g-z]{8}", 0..5),
            ) {
                let (_temp, store) = store();
                store.mark_failed(&failed).unwrap();
                for other in &others {
                    store.save_pending_update(other).unwrap();
                    store.mark_failed(other).unwrap();
                    store.remove_pending_update().unwrap();
                }
                prop_assert!(store.is_failed(&failed).unwrap());
            }
        }
    }
}
