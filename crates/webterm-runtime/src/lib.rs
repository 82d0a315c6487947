//! Async runtime selection for webterm.
//!
//! The client's `run` future is the only thing this crate executes. It picks
//! the scheduler that will host it, exactly once per process:
//! - `RuntimeBootstrapper` - probes, chooses and starts a runtime
//! - `AcceleratedRuntime` - the optional faster runtime (multi-thread tokio)
//! - `ScopedRunner` - owns a runtime and tears it down on every exit path
//! - `installed` - the once-only process-wide runtime
//!
//! # Example
//!
//! ```
//! use webterm_runtime::{RuntimeBootstrapper, RuntimeConfig};
//!
//! let bootstrapper = RuntimeBootstrapper::detect(RuntimeConfig::default());
//! println!("using {}", bootstrapper.choice());
//! let answer = bootstrapper.run(async { 42 }).unwrap();
//! assert_eq!(answer, 42);
//! ```

pub mod accelerated;
pub mod bootstrapper;
pub mod config;
pub mod error;
pub mod installed;
pub mod scoped;

pub use accelerated::{probe, AcceleratedRuntime, MultiThreadRuntime};
pub use bootstrapper::{RuntimeBootstrapper, RuntimeChoice, RuntimeKind, StartupStrategy};
pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use scoped::ScopedRunner;
