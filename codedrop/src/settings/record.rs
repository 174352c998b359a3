//! Persisted settings record.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::package::StatusReport;

/// An installed package that has not confirmed itself yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingUpdate {
    /// Hash of the pending package.
    pub hash: String,

    /// Set when the package has been handed to the host runtime.
    ///
    /// Finding this flag still set on the next launch means the package
    /// crashed before confirming itself.
    #[serde(default)]
    pub is_loading: bool,
}

impl PendingUpdate {
    pub fn new(hash: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            is_loading: false,
        }
    }
}

/// Everything the settings store persists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsRecord {
    #[serde(default)]
    pub pending_update: Option<PendingUpdate>,

    #[serde(default)]
    pub failed_hashes: BTreeSet<String>,

    /// Status report that could not be delivered and awaits retry.
    #[serde(default)]
    pub retry_status_report: Option<StatusReport>,

    /// Identifier of the last deployment reported successfully.
    #[serde(default)]
    pub last_deployment_report: Option<String>,
}
