//! Options for a sync cycle.

use std::time::Duration;

use crate::package::InstallMode;

/// Per-call sync options.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use codedrop::package::InstallMode;
/// use codedrop::updater::SyncOptions;
///
/// let options = SyncOptions::default()
///     .with_install_mode(InstallMode::OnNextResume)
///     .with_minimum_background_duration(Duration::from_secs(600))
///     .with_confirmation(true);
///
/// assert_eq!(options.mandatory_install_mode, InstallMode::Immediate);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Deployment key for this cycle only.
    pub deployment_key: Option<String>,
    /// Install mode for optional updates.
    pub install_mode: InstallMode,
    /// Install mode for mandatory updates.
    pub mandatory_install_mode: InstallMode,
    /// Time the app must spend in the background before an
    /// `OnNextResume` update is applied.
    pub minimum_background_duration: Duration,
    /// Skip updates that previously failed to start.
    pub ignore_failed_updates: bool,
    /// Ask the user before downloading optional updates.
    pub require_confirmation: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            deployment_key: None,
            install_mode: InstallMode::OnNextRestart,
            mandatory_install_mode: InstallMode::Immediate,
            minimum_background_duration: Duration::ZERO,
            ignore_failed_updates: true,
            require_confirmation: false,
        }
    }
}

impl SyncOptions {
    pub fn with_deployment_key(mut self, key: impl Into<String>) -> Self {
        self.deployment_key = Some(key.into());
        self
    }

    pub fn with_install_mode(mut self, mode: InstallMode) -> Self {
        self.install_mode = mode;
        self
    }

    pub fn with_mandatory_install_mode(mut self, mode: InstallMode) -> Self {
        self.mandatory_install_mode = mode;
        self
    }

    pub fn with_minimum_background_duration(mut self, duration: Duration) -> Self {
        self.minimum_background_duration = duration;
        self
    }

    pub fn with_ignore_failed_updates(mut self, ignore: bool) -> Self {
        self.ignore_failed_updates = ignore;
        self
    }

    pub fn with_confirmation(mut self, required: bool) -> Self {
        self.require_confirmation = required;
        self
    }

    /// Install mode applying to a package with the given mandatory flag.
    pub fn install_mode_for(&self, is_mandatory: bool) -> InstallMode {
        if is_mandatory {
            self.mandatory_install_mode
        } else {
            self.install_mode
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SyncOptions::default();
        assert_eq!(options.install_mode, InstallMode::OnNextRestart);
        assert!(options.ignore_failed_updates);
        assert!(!options.require_confirmation);
    }

    #[test]
    fn test_install_mode_for() {
        let options = SyncOptions::default().with_install_mode(InstallMode::OnNextResume);
        assert_eq!(options.install_mode_for(false), InstallMode::OnNextResume);
        assert_eq!(options.install_mode_for(true), InstallMode::Immediate);
    }
}
