//! The update orchestrator.
//!
//! [`UpdateCore`] owns one instance's sync state and drives the check,
//! confirm, download, install and apply pipeline against the settings store,
//! the package store and the acquisition client. It also implements the
//! lifecycle hooks a host calls on start, suspend, resume and readiness.
//!
//! # Locking
//!
//! All mutable bookkeeping lives in a [`SyncState`] behind a short-lived
//! mutex. The lock is never held across a call into a store, the network or a
//! host capability.

use std::error::Error as StdError;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::capabilities::Capabilities;
use super::error::{SyncError, UpdaterError, UpdaterResult};
use super::options::SyncOptions;
use super::state::{SyncGuard, SyncState};
use crate::acquisition::{AcquisitionClient, HttpAcquisitionClient};
use crate::config::{same_app_version, CheckFrequency, UpdaterConfig};
use crate::package::{
    InstallMode, LocalPackage, Package, RemotePackage, StatusReport, SyncStatus, UpdateState,
};
use crate::platform::{
    AppLoader, ConfirmationDecision, DefaultPlatformUtils, ProgressCounters, ProgressReporter,
};
use crate::settings::{FileSettingsStore, SettingsStore};
use crate::store::{DownloadResult, FilePackageStore, PackageStore, StoreError, CONTENT_DIR};

/// Over-the-air update client for one host application.
pub struct UpdateCore {
    config: UpdaterConfig,
    settings: Arc<dyn SettingsStore>,
    store: Arc<dyn PackageStore>,
    acquisition: Arc<dyn AcquisitionClient>,
    capabilities: Capabilities,
    state: Mutex<SyncState>,
}

impl UpdateCore {
    /// Assemble an updater from explicit collaborators.
    pub fn new(
        config: UpdaterConfig,
        settings: Arc<dyn SettingsStore>,
        store: Arc<dyn PackageStore>,
        acquisition: Arc<dyn AcquisitionClient>,
        capabilities: Capabilities,
    ) -> Self {
        Self {
            config,
            settings,
            store,
            acquisition,
            capabilities,
            state: Mutex::new(SyncState::default()),
        }
    }

    /// Assemble an updater backed by the file stores under
    /// [`UpdaterConfig::storage_root`] and the HTTP acquisition client.
    pub fn open(config: UpdaterConfig, capabilities: Capabilities) -> UpdaterResult<Self> {
        const OP: &str = "open";
        let root = config.storage_root();

        let platform = DefaultPlatformUtils::new().map_err(native(OP))?;
        let store = FilePackageStore::new(root.clone(), Arc::new(platform))
            .with_public_key(config.public_key().map(str::to_string));
        let settings = FileSettingsStore::new(&root);
        let acquisition = HttpAcquisitionClient::new().map_err(native(OP))?;

        info!(root = %root.display(), "Opened update storage");
        Ok(Self::new(
            config,
            Arc::new(settings),
            Arc::new(store),
            Arc::new(acquisition),
            capabilities,
        ))
    }

    pub fn config(&self) -> &UpdaterConfig {
        &self.config
    }

    pub fn is_sync_in_progress(&self) -> bool {
        self.state.lock().sync_in_progress()
    }

    pub fn is_running_binary_version(&self) -> bool {
        self.state.lock().is_running_binary_version()
    }

    /// Override the binary-version flag, e.g. when the host loaded its
    /// bundled content regardless of what is installed.
    pub fn set_running_binary_version(&self, running: bool) {
        self.state.lock().is_running_binary_version = running;
    }

    /// Startup reconciliation. Call once per process before anything else.
    ///
    /// - A pending package that was already handed to the runtime but never
    ///   confirmed crashed: it is marked failed, rolled back and reported.
    /// - A pending package starting for the first time is marked loading.
    /// - Packages built for a different binary version are discarded.
    pub fn initialize(&self) -> UpdaterResult<()> {
        const OP: &str = "initialize";

        match self.settings.pending_update().map_err(native(OP))? {
            Some(pending) if pending.is_loading => self.roll_back_crashed(&pending.hash)?,
            Some(pending) => {
                let current = self.store.current_package().map_err(native(OP))?;
                if current.is_some_and(|c| c.package_hash == pending.hash) {
                    self.settings.mark_pending_loading().map_err(native(OP))?;
                    self.state.lock().did_update = true;
                    info!(hash = %pending.hash, "Starting pending update");
                } else {
                    warn!(hash = %pending.hash, "Pending update is not installed, discarding");
                    self.settings.remove_pending_update().map_err(native(OP))?;
                }
            }
            None => {}
        }

        if let Some(current) = self.store.current_package().map_err(native(OP))? {
            if !same_app_version(&current.app_version, self.config.app_version()) {
                info!(
                    package_version = %current.app_version,
                    binary_version = %self.config.app_version(),
                    "Binary version changed, clearing updates"
                );
                self.store.clear_updates().map_err(native(OP))?;
                self.settings.remove_pending_update().map_err(native(OP))?;
                self.state.lock().did_update = false;
            }
        }

        let running_binary = self.store.current_package().map_err(native(OP))?.is_none();
        let retry = self
            .settings
            .retry_status_report()
            .map_err(native(OP))?
            .is_some();

        let mut state = self.state.lock();
        state.is_running_binary_version = running_binary;
        state.retry_report_on_resume = retry;
        debug!(running_binary, retry, "Updater initialized");
        Ok(())
    }

    fn roll_back_crashed(&self, hash: &str) -> UpdaterResult<()> {
        const OP: &str = "initialize";
        warn!(hash = %hash, "Update did not confirm itself, rolling back");

        let failed = self.store.package(hash).map_err(native(OP))?;
        self.settings.mark_failed(hash).map_err(native(OP))?;

        let current = self.store.current_package().map_err(native(OP))?;
        if current.is_some_and(|c| c.package_hash == hash) {
            let restored = self.store.rollback_package().map_err(native(OP))?;
            info!(
                restored = restored.as_ref().map(|p| p.package_hash.as_str()).unwrap_or("binary"),
                "Rolled back"
            );
        }
        self.settings.remove_pending_update().map_err(native(OP))?;

        if let Some(failed) = failed {
            self.send_status_report(StatusReport::failed(failed.package));
        }
        Ok(())
    }

    /// Run one sync cycle and return its terminal status.
    ///
    /// Every status, intermediate and terminal, is also delivered to the
    /// status listener. Network and download failures end the cycle with
    /// [`SyncStatus::UnknownError`]; local storage failures additionally
    /// surface as [`UpdaterError::NativeApiCall`].
    pub fn sync(&self, options: &SyncOptions) -> UpdaterResult<SyncStatus> {
        let Some((guard, cancel)) = SyncGuard::acquire(&self.state) else {
            info!("Sync already in progress");
            self.emit(SyncStatus::SyncInProgress);
            return Ok(SyncStatus::SyncInProgress);
        };

        self.supersede_status_report_retry();
        let outcome = self.run_cycle(options, &cancel);
        drop(guard);

        match outcome {
            Ok(status) => {
                self.emit(status);
                Ok(status)
            }
            Err(SyncError::Cancelled) => {
                info!("Sync cancelled");
                self.emit(SyncStatus::UpdateIgnored);
                Ok(SyncStatus::UpdateIgnored)
            }
            Err(e) if e.is_recoverable() => {
                warn!(error = %e, "Sync failed");
                self.emit(SyncStatus::UnknownError);
                Ok(SyncStatus::UnknownError)
            }
            Err(e) => {
                error!(error = %e, "Sync failed");
                self.emit(SyncStatus::UnknownError);
                Err(e.into_updater_error("sync"))
            }
        }
    }

    fn run_cycle(
        &self,
        options: &SyncOptions,
        cancel: &CancellationToken,
    ) -> Result<SyncStatus, SyncError> {
        let config = self.cycle_config(options.deployment_key.as_deref())?;

        self.emit(SyncStatus::CheckingForUpdate);
        let remote = self.query_remote(&config)?;
        checkpoint(cancel)?;

        let Some(remote) = remote else {
            return Ok(SyncStatus::UpToDate);
        };
        if remote.is_failed_install && options.ignore_failed_updates {
            info!(hash = %remote.package_hash, "Skipping update that failed before");
            return Ok(SyncStatus::UpToDate);
        }
        if self.state.lock().is_ignored(&remote.package_hash) {
            info!(hash = %remote.package_hash, "Update ignored earlier in this session");
            return Ok(SyncStatus::UpdateIgnored);
        }

        if options.require_confirmation && !remote.is_mandatory {
            self.emit(SyncStatus::AwaitingUserAction);
            match self.confirm(&remote) {
                ConfirmationDecision::Accept => {
                    info!(hash = %remote.package_hash, "Update accepted");
                }
                ConfirmationDecision::Defer => {
                    info!(hash = %remote.package_hash, "Update deferred");
                    return Ok(SyncStatus::UpdateIgnored);
                }
                ConfirmationDecision::Ignore => {
                    info!(hash = %remote.package_hash, "Update ignored");
                    self.state
                        .lock()
                        .ignored_hashes
                        .insert(remote.package_hash.clone());
                    return Ok(SyncStatus::UpdateIgnored);
                }
            }
            checkpoint(cancel)?;
        }

        self.emit(SyncStatus::DownloadingPackage);
        let download = self.download(&remote, cancel)?;
        self.report_download(&config, &remote.package);
        if let Err(cancelled) = checkpoint(cancel) {
            if let Err(e) = self.store.discard_download(&download) {
                warn!(error = %e, "Failed to discard cancelled download");
            }
            return Err(cancelled);
        }

        self.emit(SyncStatus::InstallingUpdate);
        let entry_hint = self
            .capabilities
            .entry_point
            .as_ref()
            .map(|provider| provider.entry_file_name());
        let installed = self
            .store
            .install_package(&download, &remote, entry_hint.as_deref())
            .map_err(SyncError::Store)?;
        self.settings.save_pending_update(&installed.package_hash)?;
        info!(
            hash = %installed.package_hash,
            label = %installed.label,
            "Update installed"
        );

        self.apply_install_mode(options.install_mode_for(remote.is_mandatory), options)?;
        Ok(SyncStatus::UpdateInstalled)
    }

    fn cycle_config(&self, deployment_key: Option<&str>) -> Result<UpdaterConfig, SyncError> {
        let mut config = self.config.clone();
        if let Some(key) = deployment_key {
            config.set_deployment_key(key)?;
        }
        Ok(config)
    }

    /// Ask the service for an update applicable on top of what is installed.
    ///
    /// `None` covers "nothing available", "already running it" and "already
    /// installed and waiting to apply".
    fn query_remote(&self, config: &UpdaterConfig) -> Result<Option<RemotePackage>, SyncError> {
        let baseline = match self.store.current_package().map_err(SyncError::Store)? {
            Some(current) => current.package,
            None => Package::new("", config.app_version()),
        };

        let remote = self
            .acquisition
            .query_update_with_current_package(config, &baseline)
            .map_err(SyncError::Acquisition)?;
        let Some(remote) = remote else {
            debug!("No update available");
            return Ok(None);
        };

        if remote.package_hash == baseline.package_hash {
            debug!(hash = %remote.package_hash, "Already running the latest package");
            return Ok(None);
        }
        let pending = self.settings.pending_update()?;
        if pending.is_some_and(|p| p.hash == remote.package_hash) {
            debug!(hash = %remote.package_hash, "Latest package is already installed");
            return Ok(None);
        }

        let failed = self.settings.is_failed(&remote.package_hash)?;
        Ok(Some(remote.with_failed_install(failed)))
    }

    fn confirm(&self, remote: &RemotePackage) -> ConfirmationDecision {
        match &self.capabilities.dialog {
            Some(dialog) => dialog.show(remote),
            None => {
                warn!("Confirmation requested but no dialog is configured, accepting");
                ConfirmationDecision::Accept
            }
        }
    }

    fn download(
        &self,
        remote: &RemotePackage,
        cancel: &CancellationToken,
    ) -> Result<DownloadResult, SyncError> {
        let counters = Arc::new(ProgressCounters::new());
        let reporter = self
            .capabilities
            .download_progress
            .clone()
            .map(|callback| ProgressReporter::start_default(Arc::clone(&counters), callback));

        let result = self.store.download_package(
            remote,
            &|received, total| counters.update(received, total),
            cancel,
        );

        if let Some(reporter) = reporter {
            reporter.stop();
        }

        result.map_err(|e| match e {
            StoreError::Cancelled => SyncError::Cancelled,
            other => SyncError::Download(other),
        })
    }

    fn report_download(&self, config: &UpdaterConfig, package: &Package) {
        if let Err(e) = self.acquisition.report_status_download(config, package) {
            debug!(error = %e, "Download report not delivered");
        }
    }

    fn apply_install_mode(&self, mode: InstallMode, options: &SyncOptions) -> Result<(), SyncError> {
        match mode {
            InstallMode::Immediate => {
                if !self.reload()? {
                    info!("Update will apply on next launch");
                }
            }
            InstallMode::OnNextRestart => debug!("Update will apply on next restart"),
            InstallMode::OnNextResume => {
                let minimum = options.minimum_background_duration;
                self.state.lock().resume_reload = Some(minimum);
                debug!(minimum_secs = minimum.as_secs(), "Update will apply on resume");
            }
        }
        Ok(())
    }

    /// Request cancellation of the running sync cycle.
    ///
    /// Returns `false` when no cycle is running.
    pub fn cancel_sync(&self) -> bool {
        let state = self.state.lock();
        match &state.cancellation {
            Some(token) => {
                token.cancel();
                info!("Sync cancellation requested");
                true
            }
            None => false,
        }
    }

    /// Query for an update without downloading it.
    pub fn check_for_update(
        &self,
        deployment_key: Option<&str>,
    ) -> UpdaterResult<Option<RemotePackage>> {
        const OP: &str = "check_for_update";
        let config = self
            .cycle_config(deployment_key)
            .map_err(|e| e.into_updater_error(OP))?;
        self.query_remote(&config)
            .map_err(|e| e.into_updater_error(OP))
    }

    /// Metadata for the installed package selected by `update_state`.
    ///
    /// - [`UpdateState::Running`]: the package executing now. While an update
    ///   is pending that is the previous package.
    /// - [`UpdateState::Pending`]: the installed package awaiting a restart,
    ///   or `None`.
    /// - [`UpdateState::Latest`]: the most recently installed package.
    pub fn get_update_metadata(
        &self,
        update_state: UpdateState,
    ) -> UpdaterResult<Option<LocalPackage>> {
        const OP: &str = "get_update_metadata";

        let Some(current) = self.store.current_package().map_err(native(OP))? else {
            return Ok(None);
        };
        let current_hash = current.package_hash.clone();
        // A pending package already handed to the runtime is the one running.
        let current_is_pending = self
            .settings
            .is_pending_update(&current_hash)
            .map_err(native(OP))?
            && !self
                .settings
                .pending_update()
                .map_err(native(OP))?
                .is_some_and(|p| p.is_loading);

        let (package, is_pending) = match update_state {
            UpdateState::Pending if !current_is_pending => return Ok(None),
            UpdateState::Running if current_is_pending => {
                match self.store.previous_package().map_err(native(OP))? {
                    Some(previous) => (previous, false),
                    None => return Ok(None),
                }
            }
            _ => (current, current_is_pending),
        };

        let is_failed = self
            .settings
            .is_failed(&package.package_hash)
            .map_err(native(OP))?;
        let state = self.state.lock();
        let is_first_run = state.did_update && !is_pending && package.package_hash == current_hash;

        Ok(Some(
            package
                .with_pending(is_pending)
                .with_failed_install(is_failed)
                .with_first_run(is_first_run)
                .with_debug_only(state.is_running_binary_version),
        ))
    }

    /// The running package confirms it started correctly.
    ///
    /// Clears the pending record so the next launch does not roll back, and
    /// reports a successful deployment once per package. The confirmation may
    /// come from a different process than the one that started the package.
    pub fn notify_app_ready(&self) -> UpdaterResult<()> {
        const OP: &str = "notify_app_ready";

        let mut confirmed = false;
        if let Some(pending) = self.settings.pending_update().map_err(native(OP))? {
            if pending.is_loading {
                confirmed = true;
                self.settings.remove_pending_update().map_err(native(OP))?;
                if !self.settings.is_failed(&pending.hash).map_err(native(OP))? {
                    self.settings.clear_failed().map_err(native(OP))?;
                }
                info!(hash = %pending.hash, "Update confirmed");
            } else {
                debug!(hash = %pending.hash, "Pending update has not started yet");
            }
        }

        if !confirmed && !self.state.lock().did_update {
            return Ok(());
        }
        let Some(current) = self.store.current_package().map_err(native(OP))? else {
            return Ok(());
        };
        let previous = self.store.previous_package().map_err(native(OP))?;
        let report = StatusReport::succeeded(
            current.package,
            previous.as_ref().map(|p| &p.package),
        );

        let last = self
            .settings
            .last_deployment_report()
            .map_err(native(OP))?;
        if last.as_deref() == Some(report.identifier().as_str()) {
            debug!(id = %report.identifier(), "Deployment already reported");
            return Ok(());
        }
        self.send_status_report(report);
        Ok(())
    }

    fn send_status_report(&self, report: StatusReport) {
        let id = report.identifier();
        match self.acquisition.report_status_deploy(&self.config, &report) {
            Ok(()) => {
                info!(status = report.status.as_str(), id = %id, "Status report delivered");
                if let Err(e) = self.settings.save_last_deployment_report(&id) {
                    warn!(error = %e, "Failed to record delivered report");
                }
                if let Err(e) = self.settings.remove_retry_status_report() {
                    warn!(error = %e, "Failed to clear report retry");
                }
            }
            Err(e) => {
                warn!(error = %e, id = %id, "Status report failed, retrying on resume");
                match self.settings.save_retry_status_report(&report) {
                    Ok(()) => self.state.lock().retry_report_on_resume = true,
                    Err(e) => warn!(error = %e, "Failed to persist report for retry"),
                }
            }
        }
    }

    fn retry_status_report(&self) {
        match self.settings.retry_status_report() {
            Ok(Some(report)) => {
                debug!(id = %report.identifier(), "Retrying status report");
                self.send_status_report(report);
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Failed to load report for retry"),
        }
    }

    fn supersede_status_report_retry(&self) {
        let armed = std::mem::take(&mut self.state.lock().retry_report_on_resume);
        if !armed {
            return;
        }
        match self.settings.remove_retry_status_report() {
            Ok(()) => debug!("Scheduled report retry superseded by sync"),
            Err(e) => warn!(error = %e, "Failed to drop scheduled report retry"),
        }
    }

    /// Host finished starting. Syncs when configured for [`CheckFrequency::OnAppStart`].
    pub fn notify_app_started(&self, options: &SyncOptions) -> UpdaterResult<Option<SyncStatus>> {
        if self.config.check_frequency() != CheckFrequency::OnAppStart {
            return Ok(None);
        }
        self.sync(options).map(Some)
    }

    /// Host moved to the background.
    pub fn notify_app_suspended(&self) {
        self.state.lock().suspended_at = Some(Instant::now());
    }

    /// Host returned to the foreground.
    ///
    /// Retries an undelivered status report, applies an `OnNextResume`
    /// update once the app was away long enough, and syncs when configured
    /// for [`CheckFrequency::OnAppResume`].
    pub fn notify_app_resumed(&self, options: &SyncOptions) -> UpdaterResult<Option<SyncStatus>> {
        const OP: &str = "notify_app_resumed";

        let (background, retry, resume_reload) = {
            let mut state = self.state.lock();
            let background = state
                .suspended_at
                .take()
                .map(|at| at.elapsed())
                .unwrap_or_default();
            let retry = std::mem::take(&mut state.retry_report_on_resume);
            (background, retry, state.resume_reload)
        };

        if retry {
            self.retry_status_report();
        }

        if let Some(minimum) = resume_reload {
            if background >= minimum {
                info!(background_secs = background.as_secs(), "Applying update on resume");
                self.reload().map_err(|e| e.into_updater_error(OP))?;
            } else {
                debug!(
                    background_ms = background.as_millis() as u64,
                    minimum_ms = minimum.as_millis() as u64,
                    "Not in background long enough to apply update"
                );
            }
        }

        if self.config.check_frequency() == CheckFrequency::OnAppResume {
            return self.sync(options).map(Some);
        }
        Ok(None)
    }

    /// Reload the app through the host loader.
    ///
    /// With `only_if_update_is_pending`, does nothing unless an installed
    /// update is waiting to apply. Returns whether a reload happened.
    pub fn restart_app(&self, only_if_update_is_pending: bool) -> UpdaterResult<bool> {
        const OP: &str = "restart_app";
        if only_if_update_is_pending {
            let pending = self.settings.pending_update().map_err(native(OP))?;
            if !pending.is_some_and(|p| !p.is_loading) {
                debug!("No pending update, skipping restart");
                return Ok(false);
            }
        }
        self.reload().map_err(|e| e.into_updater_error(OP))
    }

    fn reload(&self) -> Result<bool, SyncError> {
        let Some(loader) = self.capabilities.loader.clone() else {
            warn!("No app loader configured");
            return Ok(false);
        };
        {
            let mut state = self.state.lock();
            if state.restart_in_progress {
                debug!("Restart already in progress");
                return Ok(false);
            }
            state.restart_in_progress = true;
        }

        let result = self.reload_with(loader.as_ref());
        self.state.lock().restart_in_progress = false;
        result
    }

    fn reload_with(&self, loader: &dyn AppLoader) -> Result<bool, SyncError> {
        let starting = self.settings.pending_update()?.filter(|p| !p.is_loading);
        // Nothing may fail between the loading mark and `load_app` without
        // restoring the record, or the next launch reads it as a crash.
        let entry = self.resolve_entry_point().map_err(SyncError::Store)?;
        if starting.is_some() {
            self.settings.mark_pending_loading()?;
        }

        match loader.load_app(entry.as_deref()) {
            Ok(()) => {
                {
                    let mut state = self.state.lock();
                    state.resume_reload = None;
                    if starting.is_some() {
                        state.did_update = true;
                    }
                }
                info!(entry = ?entry, "App reloaded");
                if let Some(listener) = &self.capabilities.restart_listener {
                    listener.on_restart_finished();
                }
                Ok(true)
            }
            Err(e) => {
                error!(error = %e, "App reload failed");
                if let Some(pending) = starting {
                    self.settings.save_pending_update(&pending.hash)?;
                }
                if let Some(listener) = &self.capabilities.restart_listener {
                    listener.on_restart_failed(&e.to_string());
                }
                Ok(false)
            }
        }
    }

    /// Path the host should load: the installed package's entry point, its
    /// content folder, or the bundled entry point when nothing is installed.
    pub fn entry_point(&self) -> UpdaterResult<Option<PathBuf>> {
        self.resolve_entry_point().map_err(native("entry_point"))
    }

    fn resolve_entry_point(&self) -> Result<Option<PathBuf>, StoreError> {
        let current = self.store.current_package()?;
        let path = match &current {
            Some(package) => Some(self.store.entry_point_path(package).unwrap_or_else(|| {
                self.store
                    .package_folder(&package.package_hash)
                    .join(CONTENT_DIR)
            })),
            None => self
                .capabilities
                .entry_point
                .as_ref()
                .and_then(|provider| provider.binary_entry_point()),
        };
        self.state.lock().is_running_binary_version = current.is_none();
        Ok(path)
    }

    /// Remove every installed update and forget pending and failed state.
    pub fn clear_updates(&self) -> UpdaterResult<()> {
        const OP: &str = "clear_updates";
        self.store.clear_updates().map_err(native(OP))?;
        self.settings.remove_pending_update().map_err(native(OP))?;
        self.settings.clear_failed().map_err(native(OP))?;

        let mut state = self.state.lock();
        state.is_running_binary_version = true;
        state.did_update = false;
        state.resume_reload = None;
        info!("Cleared all updates");
        Ok(())
    }

    /// Discard the current package and restore the previous one.
    pub fn rollback(&self) -> UpdaterResult<Option<LocalPackage>> {
        const OP: &str = "rollback";
        let restored = self.store.rollback_package().map_err(native(OP))?;
        self.settings.remove_pending_update().map_err(native(OP))?;
        self.state.lock().did_update = false;
        Ok(restored)
    }

    fn emit(&self, status: SyncStatus) {
        debug!(status = %status, "Sync status");
        if let Some(listener) = &self.capabilities.status_listener {
            listener(status);
        }
    }
}

fn checkpoint(cancel: &CancellationToken) -> Result<(), SyncError> {
    if cancel.is_cancelled() {
        Err(SyncError::Cancelled)
    } else {
        Ok(())
    }
}

fn native<E>(operation: &'static str) -> impl FnOnce(E) -> UpdaterError
where
    E: Into<Box<dyn StdError + Send + Sync>>,
{
    move |e| UpdaterError::native(operation, e)
}
