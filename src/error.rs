//! Error types for cmdrelay
//!
//! `CommandError` is the closed set of failures a dispatched command can
//! report back to its caller.

use serde::Serialize;
use thiserror::Error;

/// Boxed cause carried by [`CommandError::Unknown`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure categories for a dispatched command
#[derive(Error, Debug)]
pub enum CommandError {
    /// The executable could not be launched, or it was killed before exiting
    #[error("Command could not be launched or terminated abnormally")]
    MissingCommand,

    /// The command ran but produced no output
    ///
    /// Only produced when the dispatcher treats empty output as a failure.
    #[error("Command produced no output")]
    MissingOutput,

    /// Any other failure in the execution pipeline
    #[error("Unknown command failure: {0}")]
    Unknown(#[source] BoxError),
}

impl CommandError {
    /// Wrap an arbitrary error as [`CommandError::Unknown`]
    pub fn unknown(err: impl Into<BoxError>) -> Self {
        CommandError::Unknown(err.into())
    }

    /// Stable snake_case name used in JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            CommandError::MissingCommand => "missing_command",
            CommandError::MissingOutput => "missing_output",
            CommandError::Unknown(_) => "unknown",
        }
    }
}

/// The foreground queue was dropped, so no more tasks can be delivered
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Foreground queue is closed")]
pub struct ForegroundClosed;

/// Serializable error info for JSON output
#[derive(Debug, Serialize, Clone)]
pub struct ErrorInfo {
    pub message: String,
    pub error_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl From<&CommandError> for ErrorInfo {
    fn from(err: &CommandError) -> Self {
        let suggestion = match err {
            CommandError::MissingCommand => {
                Some("Check that the executable path exists and is executable.".to_string())
            }
            CommandError::MissingOutput => None,
            CommandError::Unknown(_) => None,
        };

        ErrorInfo {
            message: err.to_string(),
            error_type: err.kind().to_string(),
            suggestion,
        }
    }
}
