//! Streaming HTTP downloads.

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::error::{PlatformError, PlatformResult};

/// Default timeout for HTTP requests in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Buffer size for reading/writing during downloads (64KB).
const BUFFER_SIZE: usize = 64 * 1024;

/// Blocking HTTP downloader.
///
/// The destination is always written from scratch. Cancellation is checked
/// between chunks; a cancelled or failed download leaves a partial file that
/// the caller is expected to discard.
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    client: Client,
    timeout: Duration,
}

impl HttpDownloader {
    /// Create a downloader with the default timeout.
    pub fn new() -> PlatformResult<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a downloader with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> PlatformResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PlatformError::Download {
                url: String::new(),
                reason: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Download `url` into `dest`, reporting `(received, total)` per chunk.
    ///
    /// `total` is 0 when the server does not send a content length.
    pub fn download(
        &self,
        url: &str,
        dest: &Path,
        progress: &dyn Fn(u64, u64),
        cancel: &CancellationToken,
    ) -> PlatformResult<u64> {
        if cancel.is_cancelled() {
            return Err(PlatformError::Cancelled);
        }

        let mut response = self.client.get(url).send().map_err(|e| {
            if e.is_timeout() {
                PlatformError::Timeout {
                    url: url.to_string(),
                    timeout_secs: self.timeout.as_secs(),
                }
            } else {
                PlatformError::Download {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlatformError::Download {
                url: url.to_string(),
                reason: format!("GET request failed with status {}", status),
            });
        }

        let total_size = response.content_length().unwrap_or(0);
        debug!(url = %url, total_size, "Starting download");

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| PlatformError::io(parent, e))?;
        }
        let file = File::create(dest).map_err(|e| PlatformError::io(dest, e))?;

        copy_with_progress(&mut response, url, file, dest, total_size, progress, cancel)
    }
}

/// Stream `reader` into `file` in fixed-size chunks.
pub(crate) fn copy_with_progress<R: Read>(
    reader: &mut R,
    url: &str,
    file: File,
    dest: &Path,
    total_size: u64,
    progress: &dyn Fn(u64, u64),
    cancel: &CancellationToken,
) -> PlatformResult<u64> {
    let mut writer = BufWriter::new(file);
    let mut buffer = vec![0u8; BUFFER_SIZE];
    let mut downloaded = 0u64;

    progress(0, total_size);

    loop {
        if cancel.is_cancelled() {
            return Err(PlatformError::Cancelled);
        }

        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| PlatformError::Download {
                url: url.to_string(),
                reason: format!("read error: {}", e),
            })?;

        if bytes_read == 0 {
            break;
        }

        writer
            .write_all(&buffer[..bytes_read])
            .map_err(|e| PlatformError::io(dest, e))?;

        downloaded += bytes_read as u64;
        progress(downloaded, total_size.max(downloaded));
    }

    writer.flush().map_err(|e| PlatformError::io(dest, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| PlatformError::io(dest, e))?;

    Ok(downloaded)
}
