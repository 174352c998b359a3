//! Check command - query the deployment service without installing.

use codedrop::Capabilities;
use console::style;
use indicatif::HumanBytes;

use crate::error::CliError;
use crate::runner::CliRunner;

pub fn run(runner: &CliRunner, deployment_key: Option<String>) -> Result<(), CliError> {
    runner.log_startup("check");
    let core = runner.open(Capabilities::new())?;

    match core.check_for_update(deployment_key.as_deref())? {
        None => println!("{} Up to date", style("✓").green()),
        Some(update) => {
            println!(
                "{} {}",
                style("Update available:").bold(),
                update.label_or_app_version()
            );
            println!("  Hash:      {}", update.package_hash);
            println!("  Size:      {}", HumanBytes(update.package_size));
            println!("  Mandatory: {}", if update.is_mandatory { "yes" } else { "no" });
            if !update.description.is_empty() {
                println!("  {}", update.description);
            }
            if update.is_failed_install {
                println!(
                    "  {}",
                    style("This update failed to start on this device before.").yellow()
                );
            }
        }
    }
    Ok(())
}
