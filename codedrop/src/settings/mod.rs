//! Durable updater bookkeeping.
//!
//! The settings store owns three pieces of state that must survive process
//! restarts:
//!
//! - the **pending update**: a package installed but not yet confirmed running
//! - the **failed set**: hashes that crashed before confirming themselves
//! - undelivered **status reports** awaiting retry
//!
//! Every mutation is written through to disk before it returns.

mod error;
mod file;
mod record;

pub use error::{SettingsError, SettingsResult};
pub use file::{FileSettingsStore, SETTINGS_FILENAME};
pub use record::{PendingUpdate, SettingsRecord};

use crate::package::StatusReport;

/// Durable key/value bookkeeping consulted by the updater.
///
/// Implementations must be write-through: when a mutating method returns
/// `Ok`, the change survives a crash.
pub trait SettingsStore: Send + Sync {
    /// True iff `hash` equals the stored pending hash.
    ///
    /// # Errors
    ///
    /// [`SettingsError::MalformedData`] if the persisted record cannot be parsed.
    fn is_pending_update(&self, hash: &str) -> SettingsResult<bool>;

    /// The pending update record, if any.
    fn pending_update(&self) -> SettingsResult<Option<PendingUpdate>>;

    /// Record `hash` as pending (not yet loaded).
    fn save_pending_update(&self, hash: &str) -> SettingsResult<()>;

    /// Flag the pending update as handed to the host runtime.
    fn mark_pending_loading(&self) -> SettingsResult<()>;

    /// Clear the pending pointer.
    fn remove_pending_update(&self) -> SettingsResult<()>;

    /// Add `hash` to the failed set.
    fn mark_failed(&self, hash: &str) -> SettingsResult<()>;

    /// Whether `hash` is in the failed set.
    fn is_failed(&self, hash: &str) -> SettingsResult<bool>;

    /// Empty the failed set.
    fn clear_failed(&self) -> SettingsResult<()>;

    /// Persist a report for delivery on a later resume.
    fn save_retry_status_report(&self, report: &StatusReport) -> SettingsResult<()>;

    /// The report awaiting retry, if any.
    fn retry_status_report(&self) -> SettingsResult<Option<StatusReport>>;

    /// Drop the report awaiting retry.
    fn remove_retry_status_report(&self) -> SettingsResult<()>;

    /// Identifier of the last successfully delivered deployment report.
    fn last_deployment_report(&self) -> SettingsResult<Option<String>>;

    /// Remember a successfully delivered deployment report.
    fn save_last_deployment_report(&self, identifier: &str) -> SettingsResult<()>;
}
