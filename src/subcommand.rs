//! Fixed-subcommand invocation
//!
//! Wraps a [`Dispatcher`] for one command family, e.g. `xcrun simctl ...`.
//! Every call prepends the configured leading token and runs the configured
//! executable. The spread form ([`Subcommand::invoke`] or the
//! [`subcommand!`](crate::subcommand!) macro) and the list form
//! ([`Subcommand::invoke_list`]) build the same [`Invocation`].

use crate::config::SubcommandConfig;
use crate::dispatch::{Completion, Dispatcher, OutcomeReceiver};
use crate::executor::Invocation;

/// Dispatcher bound to a fixed executable and leading token
#[derive(Debug, Clone)]
pub struct Subcommand {
    dispatcher: Dispatcher,
    leading_token: String,
    executable_path: String,
}

impl Subcommand {
    /// Bind a dispatcher to the given command family
    pub fn new(dispatcher: Dispatcher, config: &SubcommandConfig) -> Self {
        Self {
            dispatcher,
            leading_token: config.leading_token.clone(),
            executable_path: config.resolved_executable(),
        }
    }

    /// `xcrun simctl` with the default paths
    pub fn simctl(dispatcher: Dispatcher) -> Self {
        Self::new(dispatcher, &SubcommandConfig::default())
    }

    /// Build the invocation for `args` without running it
    pub fn invocation<I, S>(&self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args = std::iter::once(self.leading_token.clone())
            .chain(args.into_iter().map(Into::into));
        Invocation::new(self.executable_path.clone(), args)
    }

    /// Run the subcommand with spread arguments
    pub fn invoke(&self, args: &[&str], completion: Option<Completion>) {
        self.dispatcher.dispatch(self.invocation(args.iter().copied()), completion);
    }

    /// Run the subcommand with a pre-built argument list
    pub fn invoke_list(&self, args: Vec<String>, completion: Option<Completion>) {
        self.dispatcher.dispatch(self.invocation(args), completion);
    }

    /// Run the subcommand and receive the outcome through a oneshot channel
    pub fn request<I, S>(&self, args: I) -> OutcomeReceiver
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dispatcher.request_invocation(self.invocation(args))
    }
}

/// Variadic form of [`Subcommand::invoke`]
///
/// ```ignore
/// subcommand!(simctl, "list", "devices"; |outcome: Outcome| { /* ... */ });
/// subcommand!(simctl, "shutdown", "all");
/// ```
#[macro_export]
macro_rules! subcommand {
    ($sub:expr $(, $arg:expr)* ; $completion:expr) => {
        $sub.invoke(&[$($arg),*], Some(Box::new($completion)))
    };
    ($sub:expr $(, $arg:expr)* $(,)?) => {
        $sub.invoke(&[$($arg),*], None)
    };
}
