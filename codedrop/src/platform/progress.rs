//! Lossy progress forwarding.
//!
//! Download loops store byte counts into atomic counters and never call the
//! host callback directly. A reporter thread polls the counters and invokes
//! the callback, so a slow consumer drops intermediate values instead of
//! stalling the download.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::DownloadProgressCallback;

/// Default polling interval of the reporter thread.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Shared byte counters for a single download.
#[derive(Debug, Default)]
pub struct ProgressCounters {
    received: AtomicU64,
    total: AtomicU64,
    done: AtomicBool,
}

impl ProgressCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest byte counts.
    pub fn update(&self, received: u64, total: u64) {
        self.received.store(received, Ordering::Relaxed);
        self.total.store(total, Ordering::Relaxed);
    }

    pub fn received(&self) -> u64 {
        self.received.load(Ordering::Relaxed)
    }

    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    /// Signal the reporter to emit a final value and exit.
    pub fn signal_done(&self) {
        self.done.store(true, Ordering::SeqCst);
    }

    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::SeqCst)
    }
}

/// Background thread forwarding [`ProgressCounters`] to a callback.
///
/// Values are only reported when they change. Dropping the reporter emits
/// the final value and joins the thread.
pub struct ProgressReporter {
    handle: Option<JoinHandle<()>>,
    counters: Arc<ProgressCounters>,
}

impl ProgressReporter {
    /// Start polling `counters` every `poll_interval`.
    pub fn start(
        counters: Arc<ProgressCounters>,
        callback: DownloadProgressCallback,
        poll_interval: Duration,
    ) -> Self {
        let polled = Arc::clone(&counters);

        let handle = thread::spawn(move || {
            let mut last = None;
            let mut report = |counters: &ProgressCounters| {
                let current = (counters.received(), counters.total());
                if last != Some(current) {
                    callback(current.0, current.1);
                    last = Some(current);
                }
            };

            while !polled.is_done() {
                report(polled.as_ref());
                thread::sleep(poll_interval);
            }
            report(polled.as_ref());
        });

        Self {
            handle: Some(handle),
            counters,
        }
    }

    /// Start with [`DEFAULT_POLL_INTERVAL`].
    pub fn start_default(counters: Arc<ProgressCounters>, callback: DownloadProgressCallback) -> Self {
        Self::start(counters, callback, DEFAULT_POLL_INTERVAL)
    }

    /// Stop the reporter and wait for the final report.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.counters.signal_done();
        if let Some(handle) = self.handle.take() {
            handle.join().ok();
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.shutdown();
    }
}
