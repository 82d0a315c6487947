//! The optional accelerated runtime.
//!
//! The accelerated runtime is tokio's multi-threaded work-stealing scheduler.
//! It is an optimization only: when it is compiled out, or the host has a
//! single CPU, [`probe`] returns `None` and the caller falls back to the
//! current-thread scheduler.

use std::io;

use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use crate::config::RuntimeConfig;

/// A runtime implementation that may be preferred over the standard one.
pub trait AcceleratedRuntime: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Whether the runtime can be owned by a [`ScopedRunner`](crate::ScopedRunner).
    ///
    /// Implementations that return `false` are installed process-wide instead.
    /// [`MultiThreadRuntime`] is always scoped; the installed path serves
    /// runtimes whose lifetime cannot be tied to a single owner.
    fn supports_scoped_runner(&self) -> bool;

    /// Builds a fresh runtime.
    fn new_runtime(&self) -> io::Result<Runtime>;
}

/// Multi-threaded tokio runtime.
#[derive(Debug, Clone)]
pub struct MultiThreadRuntime {
    config: RuntimeConfig,
}

impl MultiThreadRuntime {
    /// Create a factory using `config`.
    pub fn new(config: RuntimeConfig) -> Self {
        Self { config }
    }
}

impl AcceleratedRuntime for MultiThreadRuntime {
    fn name(&self) -> &'static str {
        "multi-thread"
    }

    fn supports_scoped_runner(&self) -> bool {
        true
    }

    fn new_runtime(&self) -> io::Result<Runtime> {
        let mut builder = Builder::new_multi_thread();
        builder.enable_all().thread_name(self.config.thread_name.clone());
        if let Some(threads) = self.config.worker_threads {
            builder.worker_threads(threads);
        }
        builder.build()
    }
}

/// Looks for an accelerated runtime usable on this host.
#[cfg(feature = "accelerated")]
pub fn probe(config: &RuntimeConfig) -> Option<Box<dyn AcceleratedRuntime>> {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    if cpus < 2 && config.worker_threads.is_none() {
        debug!(cpus, "single cpu, skipping accelerated runtime");
        return None;
    }
    Some(Box::new(MultiThreadRuntime::new(config.clone())))
}

/// Looks for an accelerated runtime usable on this host.
#[cfg(not(feature = "accelerated"))]
pub fn probe(_config: &RuntimeConfig) -> Option<Box<dyn AcceleratedRuntime>> {
    debug!("accelerated runtime not compiled in");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_thread_builds() {
        let factory = MultiThreadRuntime::new(RuntimeConfig::new().with_worker_threads(2));
        let runtime = factory.new_runtime().unwrap();
        assert_eq!(runtime.block_on(async { 40 + 2 }), 42);
        assert!(factory.supports_scoped_runner());
    }

    #[cfg(feature = "accelerated")]
    #[test]
    fn test_probe_with_explicit_threads() {
        let found = probe(&RuntimeConfig::new().with_worker_threads(2));
        assert_eq!(found.map(|r| r.name()), Some("multi-thread"));
    }

    #[cfg(not(feature = "accelerated"))]
    #[test]
    fn test_probe_without_feature() {
        assert!(probe(&RuntimeConfig::default()).is_none());
    }
}
