//! Webterm CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use webterm::Cli;
use webterm_core::env_file;

fn main() -> ExitCode {
    // Earlier files win: dotenvy never overrides a variable that is set.
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_path(env_file());

    webterm::run(Cli::parse())
}
