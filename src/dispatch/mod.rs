//! Command dispatch module
//!
//! Provides the two execution contexts and the dispatcher that hops
//! between them:
//! - Background runtime for blocking spawn-and-wait
//! - Foreground queue where completions run
//! - `Dispatcher` tying both to a `ProcessRunner`

pub mod background;
pub mod dispatcher;
pub mod foreground;

pub use background::build_runtime;
pub use dispatcher::{Completion, Dispatcher, Outcome, OutcomeReceiver};
pub use foreground::{channel as foreground_channel, ForegroundHandle, ForegroundQueue, Task};
