//! Webterm - publish terminals and apps to the web.
//!
//! The binary is a thin wrapper around [`run`]:
//! - `cli` - flags and the [`InvocationIntent`] they produce
//! - `bootstrap` - branch selection, client construction, runtime hand-off
//! - `flows` - signup and welcome sub-commands
//! - `logging` - tracing subscriber setup

pub mod bootstrap;
pub mod cli;
pub mod constants;
pub mod error;
pub mod flows;
pub mod logging;

use std::process::ExitCode;

pub use bootstrap::Bootstrap;
pub use cli::{Branch, Cli, InvocationIntent};
pub use error::{BootstrapError, Result};
pub use logging::{init_logging, LoggingHandle};

/// Entry point for a parsed command line.
pub fn run(cli: Cli) -> ExitCode {
    let debug = constants::debug_enabled();
    let _logging = init_logging(debug, cli.verbose);

    let intent = InvocationIntent::from(cli);
    exit_code(Bootstrap::new().with_debug(debug).execute(&intent))
}

/// Maps an invocation's outcome to the process exit status, reporting
/// failures on the way.
pub fn exit_code(result: Result<Branch>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            bootstrap::report(&e);
            ExitCode::FAILURE
        }
    }
}
