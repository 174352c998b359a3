//! Terminal presentation: status lines, download progress and prompts.

mod dialog;
mod progress;

pub use dialog::TerminalDialog;
pub use progress::DownloadBar;

use std::sync::Arc;

use codedrop::updater::SyncStatusListener;
use codedrop::{LocalPackage, SyncStatus};
use console::style;

/// Human-readable description of a sync status.
pub fn describe(status: SyncStatus) -> &'static str {
    match status {
        SyncStatus::CheckingForUpdate => "Checking for update",
        SyncStatus::AwaitingUserAction => "Waiting for confirmation",
        SyncStatus::DownloadingPackage => "Downloading package",
        SyncStatus::InstallingUpdate => "Installing update",
        SyncStatus::UpToDate => "Up to date",
        SyncStatus::UpdateInstalled => "Update installed",
        SyncStatus::UpdateIgnored => "Update ignored",
        SyncStatus::SyncInProgress => "Another sync is already running",
        SyncStatus::UnknownError => "Sync failed",
    }
}

/// Listener printing one line per status, terminal ones highlighted.
pub fn status_printer() -> SyncStatusListener {
    Arc::new(|status| {
        let text = describe(status);
        if !status.is_terminal() {
            println!("{} {}", style("·").dim(), text);
        } else if status == SyncStatus::UnknownError {
            println!("{} {}", style("✗").red(), style(text).red());
        } else {
            println!("{} {}", style("✓").green(), style(text).bold());
        }
    })
}

/// Print package metadata as an aligned block.
pub fn print_package(package: &LocalPackage) {
    println!("  Label:       {}", package.label_or_app_version());
    println!("  Hash:        {}", package.package_hash);
    println!("  App version: {}", package.app_version);
    if !package.description.is_empty() {
        println!("  Description: {}", package.description);
    }
    if let Some(ref entry) = package.entry_point {
        println!("  Entry point: {}", entry);
    }

    let mut flags = Vec::new();
    if package.is_pending {
        flags.push("pending");
    }
    if package.is_first_run {
        flags.push("first run");
    }
    if package.is_failed_install {
        flags.push("failed before");
    }
    if package.is_mandatory {
        flags.push("mandatory");
    }
    if !flags.is_empty() {
        println!("  Flags:       {}", flags.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_status_has_a_description() {
        for status in [
            SyncStatus::UpToDate,
            SyncStatus::CheckingForUpdate,
            SyncStatus::AwaitingUserAction,
            SyncStatus::DownloadingPackage,
            SyncStatus::InstallingUpdate,
            SyncStatus::UpdateInstalled,
            SyncStatus::UpdateIgnored,
            SyncStatus::SyncInProgress,
            SyncStatus::UnknownError,
        ] {
            assert!(!describe(status).is_empty());
        }
    }
}
