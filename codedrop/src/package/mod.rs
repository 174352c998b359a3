//! Update package data model.
//!
//! # Overview
//!
//! An update is a content bundle identified by its content hash. The same
//! identity appears in two views:
//!
//! - **RemotePackage**: described by the deployment service, not yet downloaded
//! - **LocalPackage**: unpacked on disk, decorated with status flags derived
//!   from the settings store at query time
//!
//! # Type Hierarchy
//!
//! ```text
//! Package (base)               RemotePackage (composition)   LocalPackage (composition)
//! ├── package_hash             ├── package: Package          ├── package: Package
//! ├── label                    ├── download_url              ├── entry_point
//! ├── app_version              └── is_failed_install         ├── is_pending
//! ├── deployment_key                                         ├── is_first_run
//! ├── description                                            ├── is_failed_install
//! ├── is_mandatory                                           └── is_debug_only
//! └── package_size
//! ```
//!
//! Both views `Deref` to [`Package`].

mod core;
mod local;
mod remote;
mod report;
mod types;

pub use self::core::Package;
pub use local::LocalPackage;
pub use remote::RemotePackage;
pub use report::{DeploymentStatus, StatusReport};
pub use types::{InstallMode, SyncStatus, UpdateState};
