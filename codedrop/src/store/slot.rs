//! On-disk records of the package store.
//!
//! `status.json` holds the current/previous pointers; each version slot
//! carries an `app.json` with the package metadata.

use std::fs;
use std::io;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::{StoreError, StoreResult};
use crate::package::{LocalPackage, Package};
use crate::persist::save_json_atomic;

/// Pointer file name inside the packages directory.
pub const STATUS_FILENAME: &str = "status.json";

/// Metadata file name inside a version slot.
pub const METADATA_FILENAME: &str = "app.json";

/// Current and previous package pointers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPointers {
    #[serde(default)]
    pub current: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
}

impl SlotPointers {
    /// Whether `hash` is referenced by either pointer.
    pub fn references(&self, hash: &str) -> bool {
        self.current.as_deref() == Some(hash) || self.previous.as_deref() == Some(hash)
    }
}

/// Metadata persisted with each version slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotMetadata {
    #[serde(flatten)]
    pub package: Package,

    /// Entry file relative to the slot's content directory.
    #[serde(default)]
    pub entry_point: Option<String>,
}

impl From<SlotMetadata> for LocalPackage {
    fn from(metadata: SlotMetadata) -> Self {
        LocalPackage::new(metadata.package).with_entry_point(metadata.entry_point)
    }
}

/// Read a JSON record, returning `None` if it does not exist.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> StoreResult<Option<T>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(StoreError::ReadFailed {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|e| StoreError::GetPackage {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// Atomically write a JSON record.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> StoreResult<()> {
    save_json_atomic(path, value).map_err(|e| StoreError::WriteFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_pointers_missing_file() {
        let temp = TempDir::new().unwrap();
        let loaded: Option<SlotPointers> = read_json(&temp.path().join(STATUS_FILENAME)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_pointers_corrupt_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(STATUS_FILENAME);
        fs::write(&path, "{\"current\": 12").unwrap();

        let result: StoreResult<Option<SlotPointers>> = read_json(&path);
        assert!(matches!(result, Err(StoreError::GetPackage { .. })));
    }

    #[test]
    fn test_metadata_is_flat() {
        let metadata = SlotMetadata {
            package: Package::new("abc", "1.0.0").with_label("v3"),
            entry_point: Some("www/index.html".to_string()),
        };
        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["package_hash"], "abc");
        assert_eq!(json["entry_point"], "www/index.html");

        let local = LocalPackage::from(metadata);
        assert_eq!(local.label, "v3");
        assert_eq!(local.entry_point.as_deref(), Some("www/index.html"));
    }

    #[test]
    fn test_references() {
        let pointers = SlotPointers {
            current: Some("b".to_string()),
            previous: Some("a".to_string()),
        };
        assert!(pointers.references("a"));
        assert!(pointers.references("b"));
        assert!(!pointers.references("c"));
    }
}
