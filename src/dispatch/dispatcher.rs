//! Background/foreground command dispatch
//!
//! A dispatched command hops contexts twice: the blocking spawn-and-wait
//! runs on the background runtime's blocking pool, then the classified
//! outcome is handed to the foreground queue, where the completion runs.
//! Each call is independent; no state is shared between in-flight commands.

use std::fmt;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinError;

use super::foreground::ForegroundHandle;
use crate::config::DispatchConfig;
use crate::error::CommandError;
use crate::executor::{Invocation, ProcessRunner, SystemRunner};

/// Result delivered for one dispatched command
pub type Outcome = Result<Vec<u8>, CommandError>;

/// Callback that receives the outcome on the foreground context
pub type Completion = Box<dyn FnOnce(Outcome) + Send + 'static>;

/// Receiver side of [`Dispatcher::request`]
pub type OutcomeReceiver = oneshot::Receiver<Outcome>;

/// Runs commands off the caller's thread and reports back on the foreground
#[derive(Clone)]
pub struct Dispatcher {
    background: Handle,
    foreground: ForegroundHandle,
    runner: Arc<dyn ProcessRunner>,
    empty_output_is_failure: bool,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("foreground", &self.foreground)
            .field("empty_output_is_failure", &self.empty_output_is_failure)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Create a dispatcher that runs commands with [`SystemRunner`]
    pub fn new(background: Handle, foreground: ForegroundHandle) -> Self {
        Self {
            background,
            foreground,
            runner: Arc::new(SystemRunner::new()),
            empty_output_is_failure: false,
        }
    }

    /// Create a dispatcher using the classification settings from config
    pub fn from_config(
        background: Handle,
        foreground: ForegroundHandle,
        config: &DispatchConfig,
    ) -> Self {
        Self::new(background, foreground).with_empty_output_failure(config.empty_output_is_failure)
    }

    /// Replace the process runner
    pub fn with_runner(mut self, runner: Arc<dyn ProcessRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Report zero-byte output as [`CommandError::MissingOutput`]
    pub fn with_empty_output_failure(mut self, enabled: bool) -> Self {
        self.empty_output_is_failure = enabled;
        self
    }

    /// The foreground context completions are delivered on
    pub fn foreground(&self) -> &ForegroundHandle {
        &self.foreground
    }

    /// Run `program` with `args` in the background.
    ///
    /// `completion`, if given, is invoked exactly once on the foreground
    /// context. Without one the command still runs and its outcome is
    /// discarded.
    pub fn run<I, S>(&self, program: impl Into<String>, args: I, completion: Option<Completion>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dispatch(Invocation::new(program, args), completion);
    }

    /// Run a pre-built invocation in the background
    pub fn dispatch(&self, invocation: Invocation, completion: Option<Completion>) {
        let runner = Arc::clone(&self.runner);
        let empty_output_is_failure = self.empty_output_is_failure;
        let delivery = PendingDelivery {
            completion,
            foreground: self.foreground.clone(),
            command_str: invocation.to_string(),
        };

        tracing::debug!("Dispatching: {}", delivery.command_str);

        let work = self
            .background
            .spawn_blocking(move || runner.execute(&invocation.program, &invocation.args));

        // A runtime that has shut down drops this future unpolled, and the
        // delivery's Drop reports that to the completion.
        self.background.spawn(async move {
            delivery.deliver(classify(work.await, empty_output_is_failure));
        });
    }

    /// Run a command and receive its outcome through a oneshot channel.
    ///
    /// The channel is filled from the foreground context, so the foreground
    /// queue must be drained for the receiver to resolve. Dropping the
    /// receiver is allowed; the command still runs.
    pub fn request<I, S>(&self, program: impl Into<String>, args: I) -> OutcomeReceiver
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.request_invocation(Invocation::new(program, args))
    }

    /// [`Dispatcher::request`] for a pre-built invocation
    pub fn request_invocation(&self, invocation: Invocation) -> OutcomeReceiver {
        let (tx, rx) = oneshot::channel();
        self.dispatch(
            invocation,
            Some(Box::new(move |outcome: Outcome| {
                // Receiver may have been dropped; that's fine
                let _ = tx.send(outcome);
            })),
        );
        rx
    }
}

/// Completion of one dispatched command, held until it reaches the foreground.
///
/// Dropping it undelivered submits [`CommandError::Unknown`] instead, so the
/// completion still runs exactly once.
struct PendingDelivery {
    completion: Option<Completion>,
    foreground: ForegroundHandle,
    command_str: String,
}

impl PendingDelivery {
    fn deliver(mut self, outcome: Outcome) {
        let Some(completion) = self.completion.take() else {
            tracing::debug!("No completion for '{}', discarding outcome", self.command_str);
            return;
        };

        if let Err(e) = &outcome {
            tracing::debug!("'{}' failed: {}", self.command_str, e);
        }

        self.submit(completion, outcome);
    }

    fn submit(&self, completion: Completion, outcome: Outcome) {
        if self.foreground.submit(move || completion(outcome)).is_err() {
            tracing::warn!("Foreground queue closed, dropping outcome of '{}'", self.command_str);
        }
    }
}

impl Drop for PendingDelivery {
    fn drop(&mut self) {
        if let Some(completion) = self.completion.take() {
            tracing::warn!("Background task for '{}' dropped before completing", self.command_str);
            self.submit(
                completion,
                Err(CommandError::unknown(
                    "background runtime shut down before the command finished",
                )),
            );
        }
    }
}

/// Map the background task result onto an [`Outcome`]
fn classify(result: Result<Option<Vec<u8>>, JoinError>, empty_output_is_failure: bool) -> Outcome {
    match result {
        Ok(Some(bytes)) if bytes.is_empty() && empty_output_is_failure => {
            Err(CommandError::MissingOutput)
        }
        Ok(Some(bytes)) => Ok(bytes),
        Ok(None) => Err(CommandError::MissingCommand),
        Err(e) => {
            tracing::warn!("Background command task failed: {}", e);
            Err(CommandError::unknown(e.to_string()))
        }
    }
}
