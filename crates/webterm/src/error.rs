//! Error types for the webterm entry point.

use std::io;

use thiserror::Error;
use webterm_client::ClientError;
use webterm_core::ConfigError;
use webterm_runtime::RuntimeError;

/// Everything that can end an invocation early.
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// The config file is missing or unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Session registration or publishing failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// No runtime could be started.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// An interactive flow failed.
    #[error("{flow} failed: {source}")]
    Flow {
        /// `signup` or `welcome`.
        flow: &'static str,
        #[source]
        source: io::Error,
    },
}

/// Result type alias for bootstrap operations.
pub type Result<T> = std::result::Result<T, BootstrapError>;
