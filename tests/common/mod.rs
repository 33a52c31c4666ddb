//! Common test utilities for cmdrelay tests

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::mpsc;

use cmdrelay::config::BackgroundConfig;
use cmdrelay::{build_runtime, foreground_channel, Completion, Dispatcher, ForegroundQueue, Outcome};
use tempfile::TempDir;
use tokio::runtime::Runtime;

/// Creates a temporary directory with an executable script
pub fn create_script(script_name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let script_path = dir.path().join(script_name);
    std::fs::write(&script_path, content).expect("Failed to write script");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(&script_path)
            .expect("Failed to get metadata")
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&script_path, perms).expect("Failed to set permissions");
    }

    (dir, script_path)
}

/// Background runtime with small, named pools
pub fn background() -> Runtime {
    let config = BackgroundConfig {
        max_blocking_threads: 4,
        worker_threads: Some(2),
        thread_name: "test-background".to_string(),
    };
    build_runtime(&config).expect("Failed to build runtime")
}

/// Dispatcher using the real process runner
pub fn system_dispatcher(runtime: &Runtime) -> (Dispatcher, ForegroundQueue) {
    let (foreground, queue) = foreground_channel();
    (Dispatcher::new(runtime.handle().clone(), foreground), queue)
}

/// One delivered outcome and where it was delivered
#[derive(Debug)]
pub struct Delivery {
    pub on_foreground: bool,
    pub thread_name: Option<String>,
    pub outcome: Outcome,
}

/// Dispatch through `submit`, drain the foreground queue on this thread
/// until the dispatcher is finished, and return every delivery.
pub fn deliveries(
    dispatcher: Dispatcher,
    queue: ForegroundQueue,
    submit: impl FnOnce(&Dispatcher, Completion),
) -> Vec<Delivery> {
    let (tx, rx) = mpsc::channel();
    let probe = dispatcher.foreground().clone();
    submit(
        &dispatcher,
        Box::new(move |outcome: Outcome| {
            tx.send(Delivery {
                on_foreground: probe.is_current(),
                thread_name: std::thread::current().name().map(String::from),
                outcome,
            })
            .expect("Failed to record delivery");
        }),
    );
    drop(dispatcher);

    queue.run();
    rx.try_iter().collect()
}

/// Sample script that prints its arguments one per line
pub const ECHO_ARGS_SCRIPT: &str = r#"#!/bin/sh
for arg in "$@"; do
    echo "$arg"
done
"#;
