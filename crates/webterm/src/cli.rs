//! Command-line interface definition using clap.

use clap::Parser;
use webterm_core::Profile;

use crate::constants::{API_KEY_ENV, ENVIRONMENT_ENV};

/// Build version string with git hash and build date.
fn version_string() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const BUILD_DATE: &str = env!("BUILD_DATE");

    // Format: "0.4.0 (abc1234, 2026-01-29)"
    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} ({}, {})", VERSION, GIT_HASH, BUILD_DATE))
}

/// Webterm - publish terminals and apps to the web
#[derive(Parser, Debug)]
#[command(name = "webterm")]
#[command(author, version = version_string(), about, long_about = None)]
pub struct Cli {
    /// Location of config file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<String>,

    /// Environment to connect to
    #[arg(
        short,
        long,
        value_enum,
        env = ENVIRONMENT_ENV,
        default_value_t = Profile::Prod
    )]
    pub environment: Profile,

    /// API key
    #[arg(short, long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Publish a remote terminal on a random URL
    #[arg(short, long)]
    pub terminal: bool,

    /// Create a webterm account
    #[arg(short, long)]
    pub signup: bool,

    /// Launch an example app
    #[arg(long)]
    pub welcome: bool,

    /// Enable verbose output (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// What the user asked for, detached from clap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationIntent {
    /// Config path as typed; resolved to an absolute path at load time.
    pub config: Option<String>,
    /// Backend profile.
    pub profile: Profile,
    /// Credential from the command line or `WEBTERM_API_KEY`.
    pub api_key: Option<String>,
    /// Register a shell terminal.
    pub terminal: bool,
    /// Run the signup flow.
    pub signup: bool,
    /// Run the welcome flow.
    pub welcome: bool,
    /// `-v` count.
    pub verbosity: u8,
}

/// The one branch an invocation takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// Account signup.
    Signup,
    /// Example app.
    Welcome,
    /// Publish sessions until interrupted.
    NormalRun,
}

impl InvocationIntent {
    /// Signup wins over welcome, welcome over a normal run.
    pub fn branch(&self) -> Branch {
        if self.signup {
            Branch::Signup
        } else if self.welcome {
            Branch::Welcome
        } else {
            Branch::NormalRun
        }
    }
}

impl From<Cli> for InvocationIntent {
    fn from(cli: Cli) -> Self {
        Self {
            config: cli.config,
            profile: cli.environment,
            api_key: cli.api_key.filter(|k| !k.is_empty()),
            terminal: cli.terminal,
            signup: cli.signup,
            welcome: cli.welcome,
            verbosity: cli.verbose,
        }
    }
}
