//! SHA-256 hashing of files and unpacked packages.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use super::error::{StoreError, StoreResult};
use crate::platform::signature::SIGNATURE_FILENAME;

/// Buffer size for reading files during checksum calculation (64KB).
const BUFFER_SIZE: usize = 64 * 1024;

/// Calculate the lowercase hex SHA-256 of a file.
pub fn calculate_file_checksum(path: &Path) -> StoreResult<String> {
    let mut file = File::open(path).map_err(|e| StoreError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let bytes_read = file
            .read(&mut buffer)
            .map_err(|e| StoreError::ReadFailed {
                path: path.to_path_buf(),
                source: e,
            })?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Hash the contents of an unpacked package directory.
///
/// Each file contributes `"<relative/path>:<sha256>"`; the entries are sorted,
/// encoded as a JSON array and hashed. The signature file at the root is
/// excluded so a package can be signed over its own hash.
pub fn compute_content_hash(dir: &Path) -> StoreResult<String> {
    let mut manifest = Vec::new();
    collect_manifest(dir, dir, &mut manifest)?;
    manifest.sort();

    let encoded = serde_json::to_string(&manifest).map_err(|e| StoreError::GetPackage {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(format!("{:x}", Sha256::digest(encoded.as_bytes())))
}

fn collect_manifest(root: &Path, dir: &Path, manifest: &mut Vec<String>) -> StoreResult<()> {
    let entries = fs::read_dir(dir).map_err(|e| StoreError::ReadFailed {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| StoreError::ReadFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();

        if path.is_dir() {
            collect_manifest(root, &path, manifest)?;
            continue;
        }

        let relative = relative_key(root, &path);
        if relative == SIGNATURE_FILENAME {
            continue;
        }
        manifest.push(format!("{}:{}", relative, calculate_file_checksum(&path)?));
    }

    Ok(())
}

/// Relative path with `/` separators on every platform.
pub(crate) fn relative_key(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
