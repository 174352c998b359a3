//! Per-instance sync state.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

/// Mutable bookkeeping owned by one [`UpdateCore`](super::UpdateCore).
///
/// Lives behind the core's mutex. The core never holds that lock while it
/// calls into stores or host collaborators.
#[derive(Debug, Default)]
pub struct SyncState {
    pub(crate) sync_in_progress: bool,
    pub(crate) is_running_binary_version: bool,
    pub(crate) cancellation: Option<CancellationToken>,
    pub(crate) restart_in_progress: bool,
    /// The pending package was handed to the runtime in this process.
    pub(crate) did_update: bool,
    /// Armed by an `OnNextResume` install: minimum background time before reload.
    pub(crate) resume_reload: Option<Duration>,
    pub(crate) suspended_at: Option<Instant>,
    pub(crate) retry_report_on_resume: bool,
    /// Hashes the user chose to ignore. Never persisted.
    pub(crate) ignored_hashes: HashSet<String>,
}

impl SyncState {
    pub fn sync_in_progress(&self) -> bool {
        self.sync_in_progress
    }

    pub fn is_running_binary_version(&self) -> bool {
        self.is_running_binary_version
    }

    pub fn cancellation_requested(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    pub fn did_update(&self) -> bool {
        self.did_update
    }

    pub fn is_resume_reload_armed(&self) -> bool {
        self.resume_reload.is_some()
    }

    pub fn is_ignored(&self, hash: &str) -> bool {
        self.ignored_hashes.contains(hash)
    }
}

/// Exclusive claim on the sync slot.
///
/// Acquired with a test-and-set; dropping the guard clears the in-progress
/// flag and the cycle's cancellation token on every exit path.
pub(crate) struct SyncGuard<'a> {
    state: &'a Mutex<SyncState>,
}

impl<'a> SyncGuard<'a> {
    /// Claim the slot, or `None` if a cycle is already running.
    pub(crate) fn acquire(state: &'a Mutex<SyncState>) -> Option<(Self, CancellationToken)> {
        let mut guard = state.lock();
        if guard.sync_in_progress {
            return None;
        }

        let token = CancellationToken::new();
        guard.sync_in_progress = true;
        guard.cancellation = Some(token.clone());
        Some((Self { state }, token))
    }
}

impl Drop for SyncGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        state.sync_in_progress = false;
        state.cancellation = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_is_exclusive_and_releases() {
        let state = Mutex::new(SyncState::default());

        let (guard, token) = SyncGuard::acquire(&state).unwrap();
        assert!(state.lock().sync_in_progress());
        assert!(SyncGuard::acquire(&state).is_none());

        token.cancel();
        assert!(state.lock().cancellation_requested());

        drop(guard);
        assert!(!state.lock().sync_in_progress());
        assert!(!state.lock().cancellation_requested());
        assert!(SyncGuard::acquire(&state).is_some());
    }

    #[test]
    fn test_guard_released_on_panic() {
        let state = Mutex::new(SyncState::default());
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _claim = SyncGuard::acquire(&state).unwrap();
            panic!("cycle failed");
        }));
        assert!(result.is_err());
        assert!(!state.lock().sync_in_progress());
    }
}
