//! Starting the host application as a child process.

use std::path::Path;
use std::process::Command;

use codedrop::platform::{AppLoader, PlatformError, PlatformResult};

/// Environment variable carrying the entry point to the launched app.
pub const ENTRY_POINT_ENV: &str = "CODEDROP_ENTRY_POINT";

/// Runs a user-supplied command with the entry point in [`ENTRY_POINT_ENV`].
#[derive(Debug, Clone)]
pub struct CommandLoader {
    program: String,
    args: Vec<String>,
}

impl CommandLoader {
    /// `None` when `command` is empty.
    pub fn new(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn command(&self, entry_point: Option<&Path>) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(path) = entry_point {
            command.env(ENTRY_POINT_ENV, path);
        }
        command
    }
}

impl AppLoader for CommandLoader {
    fn load_app(&self, entry_point: Option<&Path>) -> PlatformResult<()> {
        self.command(entry_point)
            .spawn()
            .map(drop)
            .map_err(|e| PlatformError::Load(format!("failed to start {}: {}", self.program, e)))
    }
}
