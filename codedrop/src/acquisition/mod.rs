//! Acquisition client: queries the deployment service.
//!
//! Pure request/response. Nothing here reads or writes local state, so a
//! query can be repeated freely.

mod client;
mod error;
mod transport;
mod wire;

pub use client::HttpAcquisitionClient;
pub use error::{AcquisitionError, AcquisitionResult};
pub use transport::{HttpTransport, ReqwestTransport};

use crate::config::UpdaterConfig;
use crate::package::{Package, RemotePackage, StatusReport};

/// Deployment service client.
pub trait AcquisitionClient: Send + Sync {
    /// Ask whether a newer package than `current` is available.
    ///
    /// `Ok(None)` means the service reports no update. Transport, auth and
    /// protocol failures are errors, never `None`.
    fn query_update_with_current_package(
        &self,
        config: &UpdaterConfig,
        current: &Package,
    ) -> AcquisitionResult<Option<RemotePackage>>;

    /// Report a deployment outcome.
    fn report_status_deploy(
        &self,
        config: &UpdaterConfig,
        report: &StatusReport,
    ) -> AcquisitionResult<()>;

    /// Report that a package was downloaded.
    fn report_status_download(
        &self,
        config: &UpdaterConfig,
        package: &Package,
    ) -> AcquisitionResult<()>;
}
