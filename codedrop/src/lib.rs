//! codedrop - over-the-air content updates for installed applications
//!
//! This library keeps an application's updatable content in step with a
//! deployment service: it checks for new packages, downloads and verifies
//! them, installs them into versioned slots and rolls back packages that
//! never confirm a successful start.
//!
//! The entry point is [`updater::UpdateCore`].

pub mod acquisition;
pub mod config;
pub mod logging;
pub mod package;
pub mod persist;
pub mod platform;
pub mod settings;
pub mod store;
pub mod updater;

pub use package::{InstallMode, LocalPackage, Package, RemotePackage, SyncStatus, UpdateState};
pub use updater::{Capabilities, SyncOptions, UpdateCore, UpdaterError, UpdaterResult};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
