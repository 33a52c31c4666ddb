//! Command execution module
//!
//! Provides the blocking half of command dispatch:
//! - `Invocation` - the program and arguments for one command
//! - `ProcessRunner` - spawns a command and waits for its stdout
//! - `SystemRunner` - the `std::process` backed runner

pub mod invocation;
pub mod process;

pub use invocation::Invocation;
pub use process::{ProcessRunner, SystemRunner};
