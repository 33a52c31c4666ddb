//! Configuration model for cmdrelay
//!
//! Defines the structure for XDG-compliant layered configuration.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Fixed-subcommand invocation settings
    #[serde(default)]
    pub subcommand: SubcommandConfig,

    /// Background pool used for blocking process execution
    #[serde(default)]
    pub background: BackgroundConfig,

    /// Outcome classification settings
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

/// Leading token and executable for the fixed-subcommand layer
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SubcommandConfig {
    /// Token prepended to every argument list (e.g. `simctl`)
    #[serde(default = "default_leading_token")]
    pub leading_token: String,

    /// Executable the subcommand family is run through
    #[serde(default = "default_executable_path")]
    pub executable_path: String,
}

fn default_leading_token() -> String {
    "simctl".to_string()
}

fn default_executable_path() -> String {
    "/usr/bin/xcrun".to_string()
}

impl Default for SubcommandConfig {
    fn default() -> Self {
        Self {
            leading_token: default_leading_token(),
            executable_path: default_executable_path(),
        }
    }
}

impl SubcommandConfig {
    /// Create a config for an arbitrary command family
    pub fn new(leading_token: impl Into<String>, executable_path: impl Into<String>) -> Self {
        Self {
            leading_token: leading_token.into(),
            executable_path: executable_path.into(),
        }
    }

    /// Executable path with a leading `~` expanded to the home directory
    pub fn resolved_executable(&self) -> String {
        shellexpand::tilde(&self.executable_path).into_owned()
    }
}

/// Background runtime settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackgroundConfig {
    /// Upper bound on concurrently blocked process waits
    #[serde(default = "default_max_blocking_threads")]
    pub max_blocking_threads: usize,

    /// Async worker threads (None = one per core)
    #[serde(default)]
    pub worker_threads: Option<usize>,

    /// Name given to background threads
    #[serde(default = "default_thread_name")]
    pub thread_name: String,
}

fn default_max_blocking_threads() -> usize {
    64
}

fn default_thread_name() -> String {
    "cmdrelay-background".to_string()
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            max_blocking_threads: default_max_blocking_threads(),
            worker_threads: None,
            thread_name: default_thread_name(),
        }
    }
}

/// Outcome classification settings
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default)]
pub struct DispatchConfig {
    /// Report a successful launch with zero output bytes as `MissingOutput`
    #[serde(default)]
    pub empty_output_is_failure: bool,
}
