//! Startup sequence: pick a branch, build the client, start a runtime.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, error, info, warn};
use webterm_client::{ClientOrchestrator, Publisher};
use webterm_core::config::resolve_path;
use webterm_core::{
    default_document, default_shell, identity, load_from_path, resolve, ConfigError,
    EnvironmentDescriptor,
};
use webterm_runtime::{RuntimeBootstrapper, RuntimeConfig};

use crate::cli::{Branch, InvocationIntent};
use crate::constants::{
    self, TERMINAL_NAME, VERSION, WELCOME_APP_COMMAND, WELCOME_APP_NAME, WELCOME_APP_SLUG,
};
use crate::error::{BootstrapError, Result};
use crate::flows::Flows;

/// Runs exactly one branch of an invocation.
///
/// A normal run resolves config before anything is registered or started,
/// so a config failure leaves no client and no runtime behind.
pub struct Bootstrap {
    flows: Flows,
    publisher: Option<Arc<dyn Publisher>>,
    runtime_config: RuntimeConfig,
    select_runtime: fn(RuntimeConfig) -> RuntimeBootstrapper,
    debug: bool,
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self::new()
    }
}

impl Bootstrap {
    /// Default flows, WebSocket publisher and runtime detection.
    pub fn new() -> Self {
        Self {
            flows: Flows::default(),
            publisher: None,
            runtime_config: RuntimeConfig::default(),
            select_runtime: RuntimeBootstrapper::detect,
            debug: constants::debug_enabled(),
        }
    }

    /// Replaces the signup and welcome flows.
    pub fn with_flows(mut self, flows: Flows) -> Self {
        self.flows = flows;
        self
    }

    /// Replaces the client's publisher.
    pub fn with_publisher(mut self, publisher: Arc<dyn Publisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Replaces runtime selection.
    pub fn with_runtime(
        mut self,
        config: RuntimeConfig,
        select: fn(RuntimeConfig) -> RuntimeBootstrapper,
    ) -> Self {
        self.runtime_config = config;
        self.select_runtime = select;
        self
    }

    /// Enables the resolved-config dump.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Run the branch `intent` selects and return which one ran.
    pub fn execute(&self, intent: &InvocationIntent) -> Result<Branch> {
        let branch = intent.branch();
        let environment = resolve(intent.profile);

        match branch {
            Branch::Signup => {
                debug!(environment = %environment, "starting signup");
                self.flows
                    .signup
                    .signup(environment)
                    .map_err(|source| BootstrapError::Flow {
                        flow: "signup",
                        source,
                    })?;
            }
            Branch::Welcome => {
                self.flows
                    .welcome
                    .welcome()
                    .map_err(|source| BootstrapError::Flow {
                        flow: "welcome",
                        source,
                    })?;
            }
            Branch::NormalRun => {
                if let Err(e) = print_disclaimer(&mut io::stderr()) {
                    debug!(error = %e, "unable to write disclaimer");
                }
                info!(version = VERSION, "starting webterm");
                info!(environment = %environment, "environment");
                if self.debug {
                    warn!("WEBTERM_DEBUG is set; logs may be verbose");
                }

                let mut client = self.build_client(intent, environment)?;
                seed_welcome(&mut client)?;

                let bootstrapper = (self.select_runtime)(self.runtime_config.clone());
                debug!(choice = %bootstrapper.choice(), "selected runtime");
                bootstrapper.run(client.run())??;
            }
        }

        Ok(branch)
    }

    /// Resolve config and construct the client, registering the terminal
    /// when one was asked for.
    pub fn build_client(
        &self,
        intent: &InvocationIntent,
        environment: &'static EnvironmentDescriptor,
    ) -> Result<ClientOrchestrator> {
        let (config, root) = match &intent.config {
            Some(raw) => {
                let path = resolve_path(raw);
                info!(path = %path.display(), "loading config");
                let config = load_from_path(&path)?;
                let root = path
                    .parent()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("."));
                (config, root)
            }
            None => {
                info!("no --config specified, using defaults");
                (default_document(), PathBuf::from("."))
            }
        };

        if self.debug {
            match serde_json::to_string_pretty(&config) {
                Ok(dump) => debug!(config = %dump, "resolved config"),
                Err(e) => debug!(error = %e, "unable to dump config"),
            }
        }

        let mut client =
            ClientOrchestrator::new(environment, config, intent.api_key.clone())?.with_root(root);
        if let Some(publisher) = &self.publisher {
            client = client.with_publisher(publisher.clone());
        }

        if intent.terminal {
            let slug = identity::generate().to_lowercase();
            client.register_terminal(TERMINAL_NAME, default_shell(), slug)?;
        }

        Ok(client)
    }
}

/// Registers the example app if nothing else will be published.
///
/// Returns whether it was added.
pub fn seed_welcome(client: &mut ClientOrchestrator) -> Result<bool> {
    if client.pending_count() > 0 {
        return Ok(false);
    }
    client.register_application(WELCOME_APP_NAME, WELCOME_APP_COMMAND, WELCOME_APP_SLUG)?;
    Ok(true)
}

/// Writes the startup notice.
pub fn print_disclaimer(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "╭──────────────────────────────────────────────────────────╮")?;
    writeln!(out, "│ webterm publishes your terminal and apps on the web.     │")?;
    writeln!(out, "│ Anyone with a published URL can use what it exposes.     │")?;
    writeln!(out, "│ Only publish what you would run on a machine you share.  │")?;
    writeln!(out, "╰──────────────────────────────────────────────────────────╯")?;
    Ok(())
}

/// Reports a failed invocation with a single diagnostic on stderr.
pub fn report(err: &BootstrapError) {
    if let Err(e) = report_to(err, &mut io::stderr()) {
        debug!(error = %e, "unable to write diagnostic");
    }
}

/// Reports a failed invocation. A missing config goes to the log only;
/// everything else is one line on `out`.
pub fn report_to(err: &BootstrapError, out: &mut dyn Write) -> io::Result<()> {
    match err {
        BootstrapError::Config(ConfigError::NotFound(path)) => {
            error!(path = %path.display(), "config not found");
            Ok(())
        }
        BootstrapError::Config(ConfigError::Malformed { path, source }) => {
            writeln!(out, "Failed to load config from {}; {}", path.display(), source)
        }
        other => writeln!(out, "Error: {}", other),
    }
}
