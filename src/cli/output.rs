//! Rendering of dispatch outcomes for the terminal

use std::io::{self, Write};

use colored::Colorize;
use serde_json::json;

use super::commands::OutputFormat;
use crate::dispatch::Outcome;
use crate::error::ErrorInfo;
use crate::executor::Invocation;

/// Write `outcome` to `out` (and failures to `err`) in the requested format
pub fn write_outcome<O: Write, E: Write>(
    out: &mut O,
    err: &mut E,
    invocation: &Invocation,
    outcome: &Outcome,
    format: OutputFormat,
) -> io::Result<()> {
    match (format, outcome) {
        (OutputFormat::Json, _) => {
            let value = match outcome {
                Ok(bytes) => json!({
                    "command": invocation,
                    "success": true,
                    "output": String::from_utf8_lossy(bytes),
                }),
                Err(e) => json!({
                    "command": invocation,
                    "success": false,
                    "error": ErrorInfo::from(e),
                }),
            };
            let text = serde_json::to_string_pretty(&value).map_err(io::Error::other)?;
            writeln!(out, "{}", text)?;
        }
        (OutputFormat::Raw, Ok(bytes)) => out.write_all(bytes)?,
        (OutputFormat::Text, Ok(bytes)) => {
            let text = String::from_utf8_lossy(bytes);
            write!(out, "{}", text)?;
            if !text.is_empty() && !text.ends_with('\n') {
                writeln!(out)?;
            }
        }
        (OutputFormat::Raw | OutputFormat::Text, Err(e)) => {
            writeln!(err, "{}: {}: {}", "error".red().bold(), invocation, e)?;
            if let Some(suggestion) = ErrorInfo::from(e).suggestion {
                writeln!(err, "{}: {}", "hint".yellow(), suggestion)?;
            }
        }
    }

    out.flush()
}
