//! Diff package application.
//!
//! A diff package carries only changed files plus a manifest listing files
//! to delete from the base package:
//!
//! ```json
//! { "deletedFiles": ["assets/old.png"] }
//! ```

use std::fs;
use std::path::{Component, Path};

use serde::Deserialize;
use tracing::debug;

use super::error::{PlatformError, PlatformResult};

/// Manifest file marking an unpacked payload as a diff.
pub const DIFF_MANIFEST_FILENAME: &str = "codedrop.diff.json";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiffManifest {
    #[serde(default)]
    deleted_files: Vec<String>,
}

/// Whether `dir` holds a diff payload.
pub fn is_diff_payload(dir: &Path) -> bool {
    dir.join(DIFF_MANIFEST_FILENAME).is_file()
}

/// Build `dest` from `base` (if any) with `diff_dir` applied on top.
pub fn apply_diff(base: Option<&Path>, diff_dir: &Path, dest: &Path) -> PlatformResult<()> {
    let manifest_path = diff_dir.join(DIFF_MANIFEST_FILENAME);
    let manifest: DiffManifest = match fs::read_to_string(&manifest_path) {
        Ok(contents) => serde_json::from_str(&contents)
            .map_err(|e| PlatformError::Diff(format!("malformed manifest: {}", e)))?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => DiffManifest::default(),
        Err(e) => return Err(PlatformError::io(manifest_path, e)),
    };

    match base {
        Some(base) => copy_dir_recursive(base, dest, None)?,
        None => fs::create_dir_all(dest).map_err(|e| PlatformError::io(dest, e))?,
    }

    for relative in &manifest.deleted_files {
        let relative = Path::new(relative);
        if !is_contained(relative) {
            return Err(PlatformError::Diff(format!(
                "refusing to delete {} outside the package",
                relative.display()
            )));
        }
        let target = dest.join(relative);
        if target.is_file() {
            fs::remove_file(&target).map_err(|e| PlatformError::io(&target, e))?;
        }
    }

    copy_dir_recursive(diff_dir, dest, Some(DIFF_MANIFEST_FILENAME))?;
    debug!(
        deleted = manifest.deleted_files.len(),
        dest = %dest.display(),
        "Applied diff"
    );
    Ok(())
}

/// Copy `source` into `dest`, overwriting existing files.
///
/// A top-level entry named `skip` is not copied.
pub fn copy_dir_recursive(source: &Path, dest: &Path, skip: Option<&str>) -> PlatformResult<()> {
    fs::create_dir_all(dest).map_err(|e| PlatformError::io(dest, e))?;

    for entry in fs::read_dir(source).map_err(|e| PlatformError::io(source, e))? {
        let entry = entry.map_err(|e| PlatformError::io(source, e))?;
        if skip.is_some_and(|name| entry.file_name() == name) {
            continue;
        }

        let source_path = entry.path();
        let dest_path = dest.join(entry.file_name());

        if source_path.is_dir() {
            copy_dir_recursive(&source_path, &dest_path, None)?;
        } else {
            fs::copy(&source_path, &dest_path).map_err(|e| PlatformError::io(&dest_path, e))?;
        }
    }

    Ok(())
}

fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}
