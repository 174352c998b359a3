//! Status command - show installed package metadata.

use clap::ValueEnum;
use codedrop::{Capabilities, UpdateState};
use console::style;

use crate::error::CliError;
use crate::runner::CliRunner;
use crate::ui::print_package;

/// Package selection for the status command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StateArg {
    /// The package the app runs now
    Running,
    /// The installed package waiting to apply
    Pending,
    /// The most recently installed package
    Latest,
}

impl From<StateArg> for UpdateState {
    fn from(state: StateArg) -> Self {
        match state {
            StateArg::Running => UpdateState::Running,
            StateArg::Pending => UpdateState::Pending,
            StateArg::Latest => UpdateState::Latest,
        }
    }
}

pub fn run(runner: &CliRunner, state: StateArg) -> Result<(), CliError> {
    runner.log_startup("status");
    let core = runner.open(Capabilities::new())?;

    match core.get_update_metadata(state.into())? {
        Some(package) => {
            println!("{}", style(format!("{:?} package", state)).bold());
            print_package(&package);
        }
        None => match state {
            StateArg::Pending => println!("No update is waiting to apply."),
            _ => println!("No update installed; the bundled version is in use."),
        },
    }
    Ok(())
}
