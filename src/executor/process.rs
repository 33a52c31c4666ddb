//! Blocking process execution
//!
//! Spawns one child process, waits for it to exit and returns everything it
//! wrote to stdout. Every launch problem is folded into `None`; nothing
//! escapes as an error or a panic.

use std::process::{Command, Stdio};

/// Runs one external command to completion on the calling thread
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner: Send + Sync {
    /// Launch `program` with `args`, wait for it, and return its stdout.
    ///
    /// Returns `None` when the program could not be launched or did not
    /// exit normally. Blocks for the lifetime of the child.
    fn execute(&self, program: &str, args: &[String]) -> Option<Vec<u8>>;
}

/// Process runner backed by `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemRunner {
    fn execute(&self, program: &str, args: &[String]) -> Option<Vec<u8>> {
        tracing::debug!("Executing: {} {}", program, args.join(" "));

        let output = match Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
        {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!("Failed to launch {}: {}", program, e);
                return None;
            }
        };

        // No exit code means the child was killed by a signal
        if output.status.code().is_none() {
            tracing::debug!("{} terminated abnormally: {}", program, output.status);
            return None;
        }

        Some(output.stdout)
    }
}
