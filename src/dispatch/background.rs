//! Background execution context
//!
//! Process waits run on the tokio blocking pool, so the runtime's
//! `max_blocking_threads` caps how many children can be waited on at once.

use tokio::runtime::{Builder, Runtime};

use crate::config::BackgroundConfig;

/// Build the multi-threaded runtime that hosts background work
pub fn build_runtime(config: &BackgroundConfig) -> std::io::Result<Runtime> {
    let mut builder = Builder::new_multi_thread();
    builder
        .enable_all()
        .thread_name(config.thread_name.clone())
        .max_blocking_threads(config.max_blocking_threads.max(1));

    if let Some(workers) = config.worker_threads {
        builder.worker_threads(workers.max(1));
    }

    tracing::debug!(
        "Starting background runtime (max_blocking_threads={}, worker_threads={:?})",
        config.max_blocking_threads,
        config.worker_threads
    );

    builder.build()
}
