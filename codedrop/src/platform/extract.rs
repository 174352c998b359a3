//! Archive extraction for downloaded packages.
//!
//! Packages are shipped as gzip-compressed tarballs. Extraction is done
//! in-process with `flate2` and `tar`; `tar` refuses entries that would
//! escape the destination directory.

use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use tar::Archive;

use super::error::{PlatformError, PlatformResult};

/// Leading bytes of a gzip stream.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Whether `path` starts with the gzip magic number.
pub fn is_gzip_archive(path: &Path) -> PlatformResult<bool> {
    let mut file = File::open(path).map_err(|e| PlatformError::io(path, e))?;
    let mut magic = [0u8; 2];
    match file.read_exact(&mut magic) {
        Ok(()) => Ok(magic == GZIP_MAGIC),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(PlatformError::io(path, e)),
    }
}

/// Extract a `.tar.gz` archive into `dest_dir`, returning the file count.
pub fn extract_tar_gz(archive: &Path, dest_dir: &Path) -> PlatformResult<usize> {
    fs::create_dir_all(dest_dir).map_err(|e| PlatformError::io(dest_dir, e))?;

    let file = File::open(archive).map_err(|e| PlatformError::io(archive, e))?;
    let mut tarball = Archive::new(GzDecoder::new(BufReader::new(file)));
    tarball
        .unpack(dest_dir)
        .map_err(|e| PlatformError::Extraction {
            path: archive.to_path_buf(),
            reason: e.to_string(),
        })?;

    count_files_recursive(dest_dir)
}

/// Count regular files under `dir`.
pub fn count_files_recursive(dir: &Path) -> PlatformResult<usize> {
    let mut count = 0;

    for entry in fs::read_dir(dir).map_err(|e| PlatformError::io(dir, e))? {
        let entry = entry.map_err(|e| PlatformError::io(dir, e))?;
        let path = entry.path();

        if path.is_dir() {
            count += count_files_recursive(&path)?;
        } else {
            count += 1;
        }
    }

    Ok(count)
}
