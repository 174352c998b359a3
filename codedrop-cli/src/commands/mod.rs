//! CLI subcommands.

pub mod check;
pub mod config;
pub mod launch;
pub mod manage;
pub mod status;
pub mod sync;
