//! CLI command definitions using clap
//!
//! Defines all CLI subcommands and their arguments.

use clap::{Parser, Subcommand, ValueEnum};

/// Run external commands in the background and report their output.
///
/// Commands run on a background pool; results are printed from the
/// foreground thread once the command exits.
#[derive(Parser, Debug)]
#[command(name = "cmdrelay")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (overrides default XDG paths)
    #[arg(short, long, global = true, env = "CMDRELAY_CONFIG")]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "raw")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an arbitrary program with arguments
    Run(RunArgs),

    /// Run the configured subcommand family (default: xcrun simctl)
    Sub(SubArgs),

    /// Show the resolved configuration
    Config,
}

/// Arguments for the `run` subcommand
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Program path, or a name to look up on PATH
    #[arg(required = true)]
    pub program: String,

    /// Arguments passed to the program
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Arguments for the `sub` subcommand
#[derive(Parser, Debug)]
pub struct SubArgs {
    /// Arguments after the leading token (e.g. `list devices`)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Output bytes exactly as the command wrote them
    Raw,
    /// Output decoded as UTF-8 (lossy), newline terminated
    Text,
    /// JSON object with the command, status and output
    Json,
}
