//! Enumerations shared by the updater and its hosts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Selects which installed package a metadata query refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UpdateState {
    /// The package currently executing.
    #[default]
    Running,
    /// Installed, waiting for a restart or resume to take effect.
    Pending,
    /// Most recently installed, regardless of pending status.
    Latest,
}

impl UpdateState {
    /// Parse from a lowercase name (`running`, `pending`, `latest`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "running" => Some(Self::Running),
            "pending" => Some(Self::Pending),
            "latest" => Some(Self::Latest),
            _ => None,
        }
    }
}

/// Lifecycle phases emitted while a sync cycle runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncStatus {
    UpToDate,
    CheckingForUpdate,
    AwaitingUserAction,
    DownloadingPackage,
    InstallingUpdate,
    UpdateInstalled,
    UpdateIgnored,
    SyncInProgress,
    UnknownError,
}

impl SyncStatus {
    /// Whether this status ends a sync cycle.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::UpToDate
                | Self::UpdateInstalled
                | Self::UpdateIgnored
                | Self::SyncInProgress
                | Self::UnknownError
        )
    }

    /// Stable upper-case name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UpToDate => "UP_TO_DATE",
            Self::CheckingForUpdate => "CHECKING_FOR_UPDATE",
            Self::AwaitingUserAction => "AWAITING_USER_ACTION",
            Self::DownloadingPackage => "DOWNLOADING_PACKAGE",
            Self::InstallingUpdate => "INSTALLING_UPDATE",
            Self::UpdateInstalled => "UPDATE_INSTALLED",
            Self::UpdateIgnored => "UPDATE_IGNORED",
            Self::SyncInProgress => "SYNC_IN_PROGRESS",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// When an installed update takes effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InstallMode {
    /// Reload the app as soon as the update is installed.
    Immediate,
    /// Leave the update pending until the next cold start.
    #[default]
    OnNextRestart,
    /// Reload the next time the app returns to the foreground.
    OnNextResume,
}

impl InstallMode {
    /// Parse from a config/CLI name (`immediate`, `on-next-restart`, `on-next-resume`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().replace('_', "-").as_str() {
            "immediate" => Some(Self::Immediate),
            "on-next-restart" | "restart" => Some(Self::OnNextRestart),
            "on-next-resume" | "resume" => Some(Self::OnNextResume),
            _ => None,
        }
    }
}

impl fmt::Display for InstallMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Immediate => "immediate",
            Self::OnNextRestart => "on-next-restart",
            Self::OnNextResume => "on-next-resume",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_state_default_is_running() {
        assert_eq!(UpdateState::default(), UpdateState::Running);
    }

    #[test]
    fn test_update_state_from_name() {
        assert_eq!(UpdateState::from_name("PENDING"), Some(UpdateState::Pending));
        assert_eq!(UpdateState::from_name("latest"), Some(UpdateState::Latest));
        assert_eq!(UpdateState::from_name("bogus"), None);
    }

    #[test]
    fn test_sync_status_terminal() {
        assert!(SyncStatus::UpToDate.is_terminal());
        assert!(SyncStatus::SyncInProgress.is_terminal());
        assert!(!SyncStatus::DownloadingPackage.is_terminal());
        assert!(!SyncStatus::AwaitingUserAction.is_terminal());
    }

    #[test]
    fn test_sync_status_display() {
        assert_eq!(SyncStatus::UpdateInstalled.to_string(), "UPDATE_INSTALLED");
    }

    #[test]
    fn test_install_mode_names() {
        assert_eq!(InstallMode::from_name("immediate"), Some(InstallMode::Immediate));
        assert_eq!(
            InstallMode::from_name("ON_NEXT_RESUME"),
            Some(InstallMode::OnNextResume)
        );
        assert_eq!(InstallMode::from_name("later"), None);

        for mode in [
            InstallMode::Immediate,
            InstallMode::OnNextRestart,
            InstallMode::OnNextResume,
        ] {
            assert_eq!(InstallMode::from_name(&mode.to_string()), Some(mode));
        }
    }
}
