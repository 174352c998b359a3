//! Download progress bar.

use std::sync::Arc;

use codedrop::platform::DownloadProgressCallback;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Progress bar that stays hidden until the first byte arrives.
pub struct DownloadBar {
    bar: ProgressBar,
}

impl DownloadBar {
    pub fn new() -> Self {
        let bar = ProgressBar::hidden();
        let style = ProgressStyle::default_bar()
            .template("  [{bar:30.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})");
        if let Ok(style) = style {
            bar.set_style(style.progress_chars("=> "));
        }
        Self { bar }
    }

    /// Callback feeding this bar, for `Capabilities::with_download_progress`.
    pub fn callback(&self) -> DownloadProgressCallback {
        let bar = self.bar.clone();
        Arc::new(move |received, total| {
            if bar.is_hidden() {
                bar.set_draw_target(ProgressDrawTarget::stderr());
            }
            if total > 0 {
                bar.set_length(total);
            }
            bar.set_position(received);
        })
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for DownloadBar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_tracks_position() {
        let download = DownloadBar::new();
        let callback = download.callback();

        callback(512, 2048);

        assert_eq!(download.bar.position(), 512);
        assert_eq!(download.bar.length(), Some(2048));
        download.finish();
    }
}
