//! Interactive update confirmation.

use codedrop::platform::{ConfirmationDecision, ConfirmationDialog};
use codedrop::RemotePackage;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use indicatif::HumanBytes;
use tracing::warn;

const CHOICES: [&str; 3] = ["Install now", "Not now", "Ignore this update"];

/// Asks on the terminal whether to install an update.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalDialog;

impl ConfirmationDialog for TerminalDialog {
    fn show(&self, package: &RemotePackage) -> ConfirmationDecision {
        println!();
        println!(
            "{} {}",
            style("Update available:").bold(),
            package.label_or_app_version()
        );
        if !package.description.is_empty() {
            println!("  {}", package.description);
        }
        if package.package_size > 0 {
            println!("  Size: {}", HumanBytes(package.package_size));
        }

        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Install this update?")
            .items(&CHOICES)
            .default(0)
            .interact();

        match choice {
            Ok(0) => ConfirmationDecision::Accept,
            Ok(2) => ConfirmationDecision::Ignore,
            Ok(_) => ConfirmationDecision::Defer,
            Err(e) => {
                warn!(error = %e, "Prompt failed, deferring update");
                ConfirmationDecision::Defer
            }
        }
    }
}
