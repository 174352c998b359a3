//! codedrop CLI - over-the-air content updates from the command line
//!
//! Drives the codedrop updater for an application whose updatable content
//! lives in the configured storage directory.

mod commands;
mod error;
mod loader;
mod runner;
mod ui;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use commands::{check, config, launch, manage, status, sync};
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "codedrop", version, about = "Over-the-air content updates")]
struct Cli {
    /// Configuration file (defaults to ~/.config/codedrop/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Ask the deployment service whether an update is available
    Check {
        /// Query a different deployment than the configured one
        #[arg(long)]
        deployment_key: Option<String>,
    },

    /// Check, download and install the latest update
    Sync(sync::SyncArgs),

    /// Reconcile installed updates, then print the entry point or start the app
    Launch(launch::LaunchArgs),

    /// Show installed package metadata
    Status {
        /// Which package to describe
        #[arg(value_enum, default_value_t = status::StateArg::Running)]
        state: status::StateArg,
    },

    /// Confirm that the installed update started correctly
    Ready,

    /// Discard the current update and restore the previous one
    Rollback,

    /// Remove every installed update
    Clear {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Manage the configuration file
    #[command(subcommand)]
    Config(config::ConfigCommands),
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", console::style("error:").red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config;
    let verbose = cli.verbose;
    let runner = || runner::CliRunner::new(config_path.as_deref(), verbose);

    match cli.command {
        Commands::Check { deployment_key } => check::run(&runner()?, deployment_key),
        Commands::Sync(args) => sync::run(&runner()?, args),
        Commands::Launch(args) => launch::run(&runner()?, args),
        Commands::Status { state } => status::run(&runner()?, state),
        Commands::Ready => manage::ready(&runner()?),
        Commands::Rollback => manage::rollback(&runner()?),
        Commands::Clear { yes } => manage::clear(&runner()?, yes),
        Commands::Config(command) => config::run(command, config_path.as_deref()),
    }
}
