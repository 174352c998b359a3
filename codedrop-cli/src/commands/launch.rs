//! Launch command - reconcile installed updates and start the app.
//!
//! This is the one command that acts as a process start: an update that was
//! launched before but never confirmed with `codedrop ready` is rolled back
//! here.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use codedrop::platform::StaticEntryPoint;
use codedrop::{Capabilities, UpdateState};
use console::style;
use tracing::info;

use crate::error::CliError;
use crate::loader::CommandLoader;
use crate::runner::CliRunner;

/// Arguments for the launch command.
#[derive(Debug, Args)]
pub struct LaunchArgs {
    /// Entry point shipped with the app, used while no update is installed
    #[arg(long)]
    pub bundled: Option<PathBuf>,

    /// Command that starts the app; receives the entry point in CODEDROP_ENTRY_POINT
    #[arg(last = true)]
    pub command: Vec<String>,
}

pub fn run(runner: &CliRunner, args: LaunchArgs) -> Result<(), CliError> {
    runner.log_startup("launch");

    let mut entry = StaticEntryPoint::new(String::new());
    if let Some(ref bundled) = args.bundled {
        entry = entry.with_binary_entry_point(bundled.clone());
    }
    let core = runner.open(Capabilities::new().with_entry_point(Arc::new(entry)))?;
    core.initialize()?;

    let entry_point = core.entry_point()?;
    if let Some(package) = core.get_update_metadata(UpdateState::Running)? {
        if package.is_first_run {
            println!(
                "{} Starting {} for the first time. Run 'codedrop ready' once it works.",
                style("→").cyan(),
                package.label_or_app_version()
            );
        }
    }

    let Some(loader) = CommandLoader::new(&args.command) else {
        match entry_point {
            Some(path) => println!("{}", path.display()),
            None => println!("(bundled version)"),
        }
        return Ok(());
    };

    info!(entry_point = ?entry_point, "Starting application");
    let status = loader
        .command(entry_point.as_deref())
        .status()
        .map_err(|e| CliError::Config(format!("Failed to start application: {}", e)))?;
    if status.success() {
        Ok(())
    } else {
        Err(CliError::AppExited(status.code()))
    }
}
