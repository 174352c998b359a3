//! Configuration management CLI commands.
//!
//! Provides `config init`, `config show` and `config path` for creating and
//! inspecting the INI configuration file.

use std::path::Path;

use clap::Subcommand;
use codedrop::config::ConfigFile;

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Create the configuration file
    Init {
        /// Deployment key issued by the deployment service
        #[arg(long)]
        deployment_key: String,

        /// Version of the installed application binary
        #[arg(long)]
        app_version: String,

        /// Deployment service URL
        #[arg(long)]
        server_url: Option<String>,

        /// Hex-encoded ed25519 key for verifying signed packages
        #[arg(long)]
        public_key: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands, path: Option<&Path>) -> Result<(), CliError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => ConfigFile::default_path()?,
    };

    match command {
        ConfigCommands::Init {
            deployment_key,
            app_version,
            server_url,
            public_key,
            force,
        } => {
            let mut config = ConfigFile::default();
            config.deployment.key = deployment_key;
            config.app.version = app_version;
            if let Some(url) = server_url {
                config.deployment.server_url = url;
            }
            config.deployment.public_key = public_key;
            run_init(&config, &path, force)
        }
        ConfigCommands::Show => run_show(&path),
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

/// Validate and write a new configuration file.
fn run_init(config: &ConfigFile, path: &Path, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        )));
    }

    config.to_updater_config()?;
    config.save_to(path)?;

    println!("Configuration file: {}", path.display());
    println!("Packages are stored under {}", config.storage.directory.display());
    Ok(())
}

fn run_show(path: &Path) -> Result<(), CliError> {
    let config = ConfigFile::load_from(path)?;
    let or_unset = |value: Option<&str>| value.unwrap_or("(not set)").to_string();

    println!("# {}", path.display());
    println!("[deployment]");
    println!("  key = {}", or_unset(Some(config.deployment.key.as_str()).filter(|k| !k.is_empty())));
    println!("  server_url = {}", config.deployment.server_url);
    println!("  public_key = {}", or_unset(config.deployment.public_key.as_deref()));
    println!();
    println!("[app]");
    println!("  version = {}", config.app.version);
    println!("  name = {}", or_unset(config.app.name.as_deref()));
    println!("  client_id = {}", or_unset(config.app.client_id.as_deref()));
    println!("  check_frequency = {}", config.app.check_frequency);
    println!();
    println!("[storage]");
    println!("  directory = {}", config.storage.directory.display());
    println!();
    println!("[logging]");
    println!(
        "  directory = {}",
        config
            .logging
            .directory
            .as_ref()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    );
    println!("  level = {}", config.logging.level);
    Ok(())
}
