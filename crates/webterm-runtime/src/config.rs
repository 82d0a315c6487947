//! Runtime configuration.

use std::time::Duration;

/// Configuration for the runtimes the bootstrapper builds.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Worker threads for the accelerated runtime (`None` = one per core).
    pub worker_threads: Option<usize>,
    /// How long a scoped runner waits for spawned work when it shuts down.
    pub shutdown_timeout: Duration,
    /// Name given to runtime threads.
    pub thread_name: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            worker_threads: None,
            shutdown_timeout: Duration::from_secs(2),
            thread_name: "webterm-worker".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of worker threads.
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = Some(threads);
        self
    }

    /// Sets the shutdown grace period.
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Sets the thread name.
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }
}
