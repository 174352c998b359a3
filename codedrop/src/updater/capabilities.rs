//! Host capabilities injected into the updater.

use std::sync::Arc;

use crate::package::SyncStatus;
use crate::platform::{
    AppLoader, ConfirmationDialog, DownloadProgressCallback, EntryPointProvider, RestartListener,
};

/// Receives every status a sync cycle emits.
pub type SyncStatusListener = Arc<dyn Fn(SyncStatus) + Send + Sync>;

/// The collaborators a host plugs into [`UpdateCore`](super::UpdateCore).
///
/// Every capability is optional:
///
/// - without a dialog, updates that would need confirmation are accepted
/// - without a loader, `Immediate` and `OnNextResume` updates wait for the
///   next launch
/// - without an entry point provider, packages are installed without
///   locating an entry file
#[derive(Clone, Default)]
pub struct Capabilities {
    pub(crate) entry_point: Option<Arc<dyn EntryPointProvider>>,
    pub(crate) dialog: Option<Arc<dyn ConfirmationDialog>>,
    pub(crate) loader: Option<Arc<dyn AppLoader>>,
    pub(crate) restart_listener: Option<Arc<dyn RestartListener>>,
    pub(crate) status_listener: Option<SyncStatusListener>,
    pub(crate) download_progress: Option<DownloadProgressCallback>,
}

impl Capabilities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry_point(mut self, provider: Arc<dyn EntryPointProvider>) -> Self {
        self.entry_point = Some(provider);
        self
    }

    pub fn with_confirmation_dialog(mut self, dialog: Arc<dyn ConfirmationDialog>) -> Self {
        self.dialog = Some(dialog);
        self
    }

    pub fn with_app_loader(mut self, loader: Arc<dyn AppLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn with_restart_listener(mut self, listener: Arc<dyn RestartListener>) -> Self {
        self.restart_listener = Some(listener);
        self
    }

    pub fn with_status_listener(mut self, listener: SyncStatusListener) -> Self {
        self.status_listener = Some(listener);
        self
    }

    pub fn with_download_progress(mut self, callback: DownloadProgressCallback) -> Self {
        self.download_progress = Some(callback);
        self
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("entry_point", &self.entry_point.is_some())
            .field("dialog", &self.dialog.is_some())
            .field("loader", &self.loader.is_some())
            .field("restart_listener", &self.restart_listener.is_some())
            .field("status_listener", &self.status_listener.is_some())
            .field("download_progress", &self.download_progress.is_some())
            .finish()
    }
}
