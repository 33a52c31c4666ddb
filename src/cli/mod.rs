//! CLI module for cmdrelay
//!
//! Provides command-line interface with the following subcommands:
//! - `run` - Run an arbitrary program
//! - `sub` - Run the configured subcommand family
//! - `config` - Show configuration

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands, OutputFormat};
pub use output::write_outcome;
