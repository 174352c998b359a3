//! Update orchestration.
//!
//! # Sync cycle
//!
//! ```text
//! CHECKING_FOR_UPDATE
//!   ├── nothing new ─────────────────────────────► UP_TO_DATE
//!   ├── failed before (ignore_failed_updates) ───► UP_TO_DATE
//!   ├── AWAITING_USER_ACTION ── defer / ignore ──► UPDATE_IGNORED
//!   └── DOWNLOADING_PACKAGE
//!         └── INSTALLING_UPDATE ─────────────────► UPDATE_INSTALLED
//!
//! network or download failure ───────────────────► UNKNOWN_ERROR
//! second concurrent call ────────────────────────► SYNC_IN_PROGRESS
//! ```
//!
//! # Lifecycle
//!
//! A host drives [`UpdateCore`] from its own lifecycle:
//!
//! 1. [`UpdateCore::initialize`] once per process, before loading anything
//! 2. [`UpdateCore::entry_point`] to find what to load
//! 3. [`UpdateCore::notify_app_ready`] once the loaded package works
//! 4. [`UpdateCore::notify_app_suspended`] / [`UpdateCore::notify_app_resumed`]
//!    as the app moves between background and foreground
//!
//! A package that is loaded but never confirmed is rolled back by the next
//! `initialize` and never offered again while failures are ignored.

mod capabilities;
mod core;
mod error;
mod options;
mod state;

pub use self::core::UpdateCore;
pub use capabilities::{Capabilities, SyncStatusListener};
pub use error::{UpdaterError, UpdaterResult};
pub use options::SyncOptions;
pub use state::SyncState;
