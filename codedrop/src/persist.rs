//! Crash-safe JSON persistence.
//!
//! Records are written to a sibling temp file, flushed to disk and renamed over
//! the destination. A crash at any point leaves either the old or the new
//! contents in place, never a torn file.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

/// Serialize `value` as pretty JSON and atomically replace `path` with it.
pub fn save_json_atomic<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    {
        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, value)
            .map_err(|e| io::Error::other(format!("failed to serialize record: {}", e)))?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
    }

    fs::rename(&temp_path, path)?;
    Ok(())
}
