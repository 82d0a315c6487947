//! Tracing setup.

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// What [`init_logging`] set up.
///
/// The subscriber is the process-wide default and stays installed until the
/// process exits. Dropping the handle does not tear it down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggingHandle {
    level: Level,
    installed: bool,
}

impl LoggingHandle {
    /// Level used when `RUST_LOG` is not set.
    pub fn level(&self) -> Level {
        self.level
    }

    /// False if another subscriber was already installed.
    pub fn installed(&self) -> bool {
        self.installed
    }

    /// True when debug output is enabled.
    pub fn is_debug(&self) -> bool {
        self.level >= Level::DEBUG
    }
}

/// Maps debug mode and the `-v` count to a default level.
pub fn log_level(debug: bool, verbosity: u8) -> Level {
    match verbosity {
        0 if debug => Level::DEBUG,
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the computed level.
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init_logging(debug: bool, verbosity: u8) -> LoggingHandle {
    let level = log_level(debug, verbosity);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let installed = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();

    LoggingHandle { level, installed }
}
