//! Error types for the runtime crate.

use thiserror::Error;

/// Errors that can occur while starting a runtime.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The runtime could not be built.
    #[error("failed to start runtime: {0}")]
    Startup(#[from] std::io::Error),

    /// A process-wide runtime is already installed.
    #[error("a process-wide runtime is already installed")]
    AlreadyInstalled,
}

/// Result type for runtime operations.
pub type Result<T> = std::result::Result<T, RuntimeError>;
