//! Scoped runner: a runtime owned for a bounded lifetime.

use std::future::Future;
use std::io;
use std::time::Duration;

use tokio::runtime::Runtime;
use tracing::debug;

use crate::accelerated::AcceleratedRuntime;

/// Owns a runtime and shuts it down when dropped.
///
/// Teardown happens on every exit path, including unwinding out of
/// [`run`](Self::run). Work still spawned on the runtime gets at most the
/// configured grace period.
pub struct ScopedRunner {
    // `Some` until dropped.
    runtime: Option<Runtime>,
    shutdown_timeout: Duration,
}

impl ScopedRunner {
    /// Builds a runtime from `factory` and takes ownership of it.
    pub fn new(factory: &dyn AcceleratedRuntime, shutdown_timeout: Duration) -> io::Result<Self> {
        Ok(Self {
            runtime: Some(factory.new_runtime()?),
            shutdown_timeout,
        })
    }

    /// Drives `future` to completion on the owned runtime.
    pub fn run<F: Future>(&self, future: F) -> F::Output {
        match &self.runtime {
            Some(runtime) => runtime.block_on(future),
            None => unreachable!("runtime is only taken on drop"),
        }
    }
}

impl Drop for ScopedRunner {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            debug!(timeout = ?self.shutdown_timeout, "shutting down scoped runtime");
            runtime.shutdown_timeout(self.shutdown_timeout);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::runtime::Builder;

    struct CurrentThread;

    impl AcceleratedRuntime for CurrentThread {
        fn name(&self) -> &'static str {
            "test"
        }

        fn supports_scoped_runner(&self) -> bool {
            true
        }

        fn new_runtime(&self) -> io::Result<Runtime> {
            Builder::new_current_thread().enable_all().build()
        }
    }

    /// Sets its flag when dropped.
    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    fn spawn_parked_task(flag: Arc<AtomicBool>) {
        tokio::spawn(async move {
            let _flag = DropFlag(flag);
            std::future::pending::<()>().await;
        });
    }

    #[test]
    fn test_run_returns_output() {
        let runner = ScopedRunner::new(&CurrentThread, Duration::from_secs(1)).unwrap();
        assert_eq!(runner.run(async { "done" }), "done");
    }

    #[test]
    fn test_drop_tears_down_spawned_work() {
        let dropped = Arc::new(AtomicBool::new(false));
        let runner = ScopedRunner::new(&CurrentThread, Duration::from_secs(1)).unwrap();

        let flag = dropped.clone();
        runner.run(async move {
            spawn_parked_task(flag);
            tokio::task::yield_now().await;
        });
        assert!(!dropped.load(Ordering::SeqCst));

        drop(runner);
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[test]
    fn test_teardown_on_panic() {
        let dropped = Arc::new(AtomicBool::new(false));

        let flag = dropped.clone();
        let result = catch_unwind(AssertUnwindSafe(move || {
            let runner = ScopedRunner::new(&CurrentThread, Duration::from_secs(1)).unwrap();
            runner.run(async move {
                spawn_parked_task(flag);
                tokio::task::yield_now().await;
                panic!("boom");
            })
        }));

        assert!(result.is_err());
        assert!(dropped.load(Ordering::SeqCst));
    }
}
