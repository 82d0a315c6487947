//! Runtime selection and startup.

use std::fmt;
use std::future::Future;

use tokio::runtime::Builder;
use tracing::{debug, info};

use crate::accelerated::{probe, AcceleratedRuntime};
use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::installed;
use crate::scoped::ScopedRunner;

/// Which scheduler drives the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeKind {
    /// Multi-threaded accelerated runtime.
    Accelerated,
    /// Current-thread runtime.
    Standard,
}

/// How the chosen runtime is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupStrategy {
    /// A [`ScopedRunner`] owns the runtime and tears it down afterwards.
    ScopedRunner,
    /// The runtime is installed process-wide, then blocked on.
    InstalledDefault,
    /// A fresh runtime is built and blocked on.
    BlockOn,
}

/// The runtime decision, fixed for the life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeChoice {
    /// Scheduler kind.
    pub kind: RuntimeKind,
    /// Startup strategy.
    pub strategy: StartupStrategy,
}

impl RuntimeChoice {
    /// The standard runtime.
    pub const STANDARD: Self = Self {
        kind: RuntimeKind::Standard,
        strategy: StartupStrategy::BlockOn,
    };

    fn accelerated(scoped: bool) -> Self {
        Self {
            kind: RuntimeKind::Accelerated,
            strategy: if scoped {
                StartupStrategy::ScopedRunner
            } else {
                StartupStrategy::InstalledDefault
            },
        }
    }
}

impl fmt::Display for RuntimeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            RuntimeKind::Accelerated => "accelerated",
            RuntimeKind::Standard => "standard",
        };
        let strategy = match self.strategy {
            StartupStrategy::ScopedRunner => "scoped runner",
            StartupStrategy::InstalledDefault => "installed default",
            StartupStrategy::BlockOn => "block on",
        };
        write!(f, "{} ({})", kind, strategy)
    }
}

/// Chooses a runtime and drives one future to completion on it.
///
/// Preference order: accelerated with a scoped runner, accelerated installed
/// process-wide, then the standard current-thread runtime. If building the
/// accelerated runtime fails the standard runtime is used instead. The
/// future's output is returned as is; only failure to start a runtime is
/// reported as an error.
pub struct RuntimeBootstrapper {
    config: RuntimeConfig,
    accelerated: Option<Box<dyn AcceleratedRuntime>>,
}

impl RuntimeBootstrapper {
    /// Probes the host for an accelerated runtime.
    pub fn detect(config: RuntimeConfig) -> Self {
        let accelerated = probe(&config);
        Self {
            config,
            accelerated,
        }
    }

    /// Always uses the standard runtime.
    pub fn standard(config: RuntimeConfig) -> Self {
        Self {
            config,
            accelerated: None,
        }
    }

    /// Uses `accelerated` when it can be built.
    pub fn with_accelerated(
        config: RuntimeConfig,
        accelerated: Box<dyn AcceleratedRuntime>,
    ) -> Self {
        Self {
            config,
            accelerated: Some(accelerated),
        }
    }

    /// The runtime [`run`](Self::run) will try first.
    pub fn choice(&self) -> RuntimeChoice {
        match &self.accelerated {
            Some(accelerated) => RuntimeChoice::accelerated(accelerated.supports_scoped_runner()),
            None => RuntimeChoice::STANDARD,
        }
    }

    /// Drives `future` to completion and returns its output.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::Startup` if no runtime could be built, and
    /// `RuntimeError::AlreadyInstalled` if the installed-default path is taken
    /// twice in one process.
    pub fn run<F: Future>(self, future: F) -> Result<F::Output> {
        if let Some(accelerated) = &self.accelerated {
            let choice = RuntimeChoice::accelerated(accelerated.supports_scoped_runner());

            if choice.strategy == StartupStrategy::ScopedRunner {
                match ScopedRunner::new(accelerated.as_ref(), self.config.shutdown_timeout) {
                    Ok(runner) => {
                        info!(runtime = accelerated.name(), choice = %choice, "starting runtime");
                        return Ok(runner.run(future));
                    }
                    Err(e) => {
                        debug!(error = %e, "accelerated runtime unavailable, using standard");
                    }
                }
            } else {
                if installed::installed().is_some() {
                    return Err(RuntimeError::AlreadyInstalled);
                }
                match accelerated.new_runtime() {
                    Ok(runtime) => {
                        let runtime = installed::install(runtime)?;
                        info!(runtime = accelerated.name(), choice = %choice, "starting runtime");
                        return Ok(runtime.block_on(future));
                    }
                    Err(e) => {
                        debug!(error = %e, "accelerated runtime unavailable, using standard");
                    }
                }
            }
        }

        let runtime = Builder::new_current_thread().enable_all().build()?;
        info!(choice = %RuntimeChoice::STANDARD, "starting runtime");
        Ok(runtime.block_on(future))
    }
}
