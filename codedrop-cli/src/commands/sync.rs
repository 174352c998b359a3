//! Sync command - check, download and install the latest update.

use std::sync::Arc;
use std::time::Duration;

use clap::{Args, ValueEnum};
use codedrop::platform::StaticEntryPoint;
use codedrop::{Capabilities, InstallMode, SyncOptions, SyncStatus};

use crate::error::CliError;
use crate::loader::CommandLoader;
use crate::runner::CliRunner;
use crate::ui::{status_printer, DownloadBar, TerminalDialog};

/// Install mode selection for CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InstallModeArg {
    /// Reload right after installing (needs a command after `--`)
    Immediate,
    /// Apply on the next launch
    OnNextRestart,
    /// Apply the next time the app resumes
    OnNextResume,
}

impl From<InstallModeArg> for InstallMode {
    fn from(mode: InstallModeArg) -> Self {
        match mode {
            InstallModeArg::Immediate => InstallMode::Immediate,
            InstallModeArg::OnNextRestart => InstallMode::OnNextRestart,
            InstallModeArg::OnNextResume => InstallMode::OnNextResume,
        }
    }
}

/// Arguments for the sync command.
#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Sync against a different deployment than the configured one
    #[arg(long)]
    pub deployment_key: Option<String>,

    /// When an optional update takes effect
    #[arg(long, value_enum, default_value_t = InstallModeArg::OnNextRestart)]
    pub install_mode: InstallModeArg,

    /// When a mandatory update takes effect
    #[arg(long, value_enum, default_value_t = InstallModeArg::Immediate)]
    pub mandatory_install_mode: InstallModeArg,

    /// Minimum seconds in background before an on-next-resume update applies
    #[arg(long, default_value_t = 0)]
    pub min_background_secs: u64,

    /// Ask before installing optional updates
    #[arg(short, long)]
    pub interactive: bool,

    /// Offer updates that failed to start on this device before
    #[arg(long)]
    pub retry_failed: bool,

    /// File name to locate inside packages as their entry point
    #[arg(long)]
    pub entry_file: Option<String>,

    /// Command that starts the app, run when an update applies immediately
    #[arg(last = true)]
    pub command: Vec<String>,
}

impl SyncArgs {
    pub fn options(&self) -> SyncOptions {
        let mut options = SyncOptions::default()
            .with_install_mode(self.install_mode.into())
            .with_mandatory_install_mode(self.mandatory_install_mode.into())
            .with_minimum_background_duration(Duration::from_secs(self.min_background_secs))
            .with_ignore_failed_updates(!self.retry_failed)
            .with_confirmation(self.interactive);
        if let Some(ref key) = self.deployment_key {
            options = options.with_deployment_key(key.clone());
        }
        options
    }
}

/// Run the sync command.
pub fn run(runner: &CliRunner, args: SyncArgs) -> Result<(), CliError> {
    runner.log_startup("sync");

    let download = DownloadBar::new();
    let mut capabilities = Capabilities::new()
        .with_status_listener(status_printer())
        .with_download_progress(download.callback());
    if args.interactive {
        capabilities = capabilities.with_confirmation_dialog(Arc::new(TerminalDialog));
    }
    if let Some(ref name) = args.entry_file {
        capabilities = capabilities.with_entry_point(Arc::new(StaticEntryPoint::new(name.clone())));
    }
    if let Some(loader) = CommandLoader::new(&args.command) {
        capabilities = capabilities.with_app_loader(Arc::new(loader));
    }

    let core = Arc::new(runner.open(capabilities)?);
    let handler_core = Arc::clone(&core);
    ctrlc::set_handler(move || {
        if handler_core.cancel_sync() {
            eprintln!();
            eprintln!("Cancelling sync...");
        }
    })
    .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))?;

    let result = core.sync(&args.options());
    download.finish();

    match result? {
        SyncStatus::UnknownError => Err(CliError::SyncFailed),
        SyncStatus::UpdateInstalled if args.install_mode == InstallModeArg::OnNextRestart => {
            println!("Run 'codedrop launch' to start the new version.");
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: SyncArgs,
    }

    fn parse(argv: &[&str]) -> SyncArgs {
        Wrapper::parse_from(std::iter::once("sync").chain(argv.iter().copied())).args
    }

    #[test]
    fn test_defaults_match_library_defaults() {
        let options = parse(&[]).options();
        let defaults = SyncOptions::default();

        assert_eq!(options.install_mode, defaults.install_mode);
        assert_eq!(options.mandatory_install_mode, defaults.mandatory_install_mode);
        assert_eq!(options.ignore_failed_updates, defaults.ignore_failed_updates);
        assert!(!options.require_confirmation);
        assert!(options.deployment_key.is_none());
    }

    #[test]
    fn test_flags_map_to_options() {
        let args = parse(&[
            "--install-mode",
            "on-next-resume",
            "--min-background-secs",
            "30",
            "--interactive",
            "--retry-failed",
            "--deployment-key",
            "staging",
            "--",
            "my-app",
            "--kiosk",
        ]);
        let options = args.options();

        assert_eq!(options.install_mode, InstallMode::OnNextResume);
        assert_eq!(options.minimum_background_duration, Duration::from_secs(30));
        assert!(options.require_confirmation);
        assert!(!options.ignore_failed_updates);
        assert_eq!(options.deployment_key.as_deref(), Some("staging"));
        assert_eq!(args.command, vec!["my-app", "--kiosk"]);
    }
}
