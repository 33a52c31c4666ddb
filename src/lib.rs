//! cmdrelay - Background Command Dispatch
//!
//! Runs external commands off the caller's thread and delivers exactly one
//! outcome per command on a designated foreground context:
//! - **Background** - a tokio runtime whose blocking pool spawns and waits
//! - **Foreground** - a single-consumer queue drained by the host thread
//! - **Subcommand** - a fixed executable plus leading token, e.g. `xcrun simctl`
//!
//! ## Outcomes
//!
//! Each command yields `Ok(stdout bytes)` or a [`CommandError`]:
//! - `MissingCommand` - the program could not be launched or was killed
//! - `MissingOutput` - the program printed nothing (opt-in)
//! - `Unknown` - the background task itself failed
//!
//! ## Example
//!
//! ```no_run
//! use cmdrelay::{build_runtime, foreground_channel, Dispatcher, Outcome};
//! use cmdrelay::config::BackgroundConfig;
//!
//! let runtime = build_runtime(&BackgroundConfig::default()).unwrap();
//! let (foreground, queue) = foreground_channel();
//! let dispatcher = Dispatcher::new(runtime.handle().clone(), foreground);
//!
//! dispatcher.run(
//!     "/bin/echo",
//!     ["hello"],
//!     Some(Box::new(|outcome: Outcome| println!("{:?}", outcome))),
//! );
//! drop(dispatcher);
//! queue.run();
//! ```

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod executor;
pub mod subcommand;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use dispatch::{
    build_runtime, foreground_channel, Completion, Dispatcher, ForegroundHandle, ForegroundQueue,
    Outcome, OutcomeReceiver,
};
pub use error::{CommandError, ErrorInfo, ForegroundClosed};
pub use executor::{Invocation, ProcessRunner, SystemRunner};
pub use subcommand::Subcommand;
