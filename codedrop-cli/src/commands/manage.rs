//! Ready, rollback and clear commands.

use codedrop::Capabilities;
use console::style;
use dialoguer::Confirm;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Confirm that the running update works.
pub fn ready(runner: &CliRunner) -> Result<(), CliError> {
    runner.log_startup("ready");
    let core = runner.open(Capabilities::new())?;
    core.notify_app_ready()?;
    println!("{} Update confirmed", style("✓").green());
    Ok(())
}

/// Restore the previous package.
pub fn rollback(runner: &CliRunner) -> Result<(), CliError> {
    runner.log_startup("rollback");
    let core = runner.open(Capabilities::new())?;

    match core.rollback()? {
        Some(package) => println!(
            "{} Restored {} ({})",
            style("✓").green(),
            package.label_or_app_version(),
            package.package_hash
        ),
        None => println!("{} Restored the bundled version", style("✓").green()),
    }
    Ok(())
}

/// Remove all installed updates.
pub fn clear(runner: &CliRunner, yes: bool) -> Result<(), CliError> {
    runner.log_startup("clear");

    if !yes {
        let proceed = Confirm::new()
            .with_prompt("Remove every installed update and return to the bundled version?")
            .default(false)
            .interact()?;
        if !proceed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let core = runner.open(Capabilities::new())?;
    core.clear_updates()?;
    println!("{} Cleared all updates", style("✓").green());
    Ok(())
}
