//! Foreground execution context
//!
//! A single-consumer task queue. Any thread may submit work through a
//! [`ForegroundHandle`]; the thread that drains the [`ForegroundQueue`] runs
//! every task in submission order. Hosts usually drain it on the thread that
//! owns user-facing state, either with [`ForegroundQueue::run`] as the main
//! loop or with [`ForegroundQueue::run_pending`] from their own event loop.

use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::JoinHandle;

use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

use crate::error::ForegroundClosed;

/// Work item executed on the foreground context
pub type Task = Box<dyn FnOnce() + Send + 'static>;

static NEXT_QUEUE_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    /// Id of the queue currently being drained on this thread
    static CURRENT_QUEUE: Cell<Option<u64>> = const { Cell::new(None) };
}

/// Create a connected handle/queue pair
pub fn channel() -> (ForegroundHandle, ForegroundQueue) {
    let id = NEXT_QUEUE_ID.fetch_add(1, Ordering::Relaxed);
    let (tx, rx) = mpsc::unbounded_channel();
    (ForegroundHandle { id, tx }, ForegroundQueue { id, rx })
}

/// Submits tasks to a foreground queue
#[derive(Debug, Clone)]
pub struct ForegroundHandle {
    id: u64,
    tx: UnboundedSender<Task>,
}

impl ForegroundHandle {
    /// Queue a task for the foreground context
    ///
    /// Fails only when the queue has been dropped.
    pub fn submit<F>(&self, task: F) -> Result<(), ForegroundClosed>
    where
        F: FnOnce() + Send + 'static,
    {
        self.tx.send(Box::new(task)).map_err(|_| ForegroundClosed)
    }

    /// Whether the calling thread is currently draining this queue
    pub fn is_current(&self) -> bool {
        CURRENT_QUEUE.with(|current| current.get() == Some(self.id))
    }
}

/// Receiving side of the foreground context
#[derive(Debug)]
pub struct ForegroundQueue {
    id: u64,
    rx: UnboundedReceiver<Task>,
}

impl ForegroundQueue {
    /// Drain tasks on the calling thread until every handle is dropped.
    ///
    /// Returns the number of tasks executed. Must not be called from inside
    /// an async runtime; use [`ForegroundQueue::spawn`] there instead.
    pub fn run(mut self) -> usize {
        let _enter = EnterGuard::enter(self.id);
        let mut executed = 0;

        while let Some(task) = self.rx.blocking_recv() {
            task();
            executed += 1;
        }

        tracing::debug!("Foreground queue {} finished after {} tasks", self.id, executed);
        executed
    }

    /// Run every task that is already queued, without waiting for more
    pub fn run_pending(&mut self) -> usize {
        let _enter = EnterGuard::enter(self.id);
        let mut executed = 0;

        loop {
            match self.rx.try_recv() {
                Ok(task) => {
                    task();
                    executed += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        executed
    }

    /// Run the queue on a dedicated, named thread
    pub fn spawn(self, name: impl Into<String>) -> std::io::Result<JoinHandle<usize>> {
        std::thread::Builder::new()
            .name(name.into())
            .spawn(move || self.run())
    }
}

/// Marks the current thread as draining a queue, restoring the previous
/// marker on drop so a panicking task leaves no stale state behind.
struct EnterGuard {
    previous: Option<u64>,
}

impl EnterGuard {
    fn enter(id: u64) -> Self {
        let previous = CURRENT_QUEUE.with(|current| current.replace(Some(id)));
        Self { previous }
    }
}

impl Drop for EnterGuard {
    fn drop(&mut self) {
        CURRENT_QUEUE.with(|current| current.set(self.previous));
    }
}
