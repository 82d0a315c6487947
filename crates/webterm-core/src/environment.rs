//! Environment profiles.
//!
//! A profile names a backend deployment. The set is closed: the CLI only
//! accepts names that map to a [`Profile`] variant, so resolving a profile
//! cannot fail at runtime.

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

/// Environment variable selecting the default profile.
pub const ENVIRONMENT_ENV: &str = "WEBTERM_ENVIRONMENT";

/// A named environment profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum Profile {
    /// Production backend.
    #[default]
    Prod,
    /// Shared development backend.
    Dev,
    /// Backend running on this machine.
    Local,
}

impl Profile {
    /// Every registered profile, in display order.
    pub const ALL: [Profile; 3] = [Profile::Prod, Profile::Dev, Profile::Local];

    /// The name accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Profile::Prod => "prod",
            Profile::Dev => "dev",
            Profile::Local => "local",
        }
    }

    /// Looks up a profile by its command-line name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Connection parameters for one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentDescriptor {
    /// Profile name.
    pub name: &'static str,
    /// Base URL of the HTTP API (ends with `/`).
    pub api_url: &'static str,
    /// WebSocket URL the publishing client connects to.
    pub url: &'static str,
}

impl EnvironmentDescriptor {
    /// Page where new accounts are created.
    pub fn signup_url(&self) -> String {
        format!("{}signup/", self.api_url)
    }
}

impl fmt::Display for EnvironmentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.url)
    }
}

static PROD: EnvironmentDescriptor = EnvironmentDescriptor {
    name: "prod",
    api_url: "https://webterm.io/api/",
    url: "wss://webterm.io/app-service/",
};

static DEV: EnvironmentDescriptor = EnvironmentDescriptor {
    name: "dev",
    api_url: "https://dev.webterm.io/api/",
    url: "wss://dev.webterm.io/app-service/",
};

static LOCAL: EnvironmentDescriptor = EnvironmentDescriptor {
    name: "local",
    api_url: "http://127.0.0.1:8080/api/",
    url: "ws://127.0.0.1:8080/app-service/",
};

/// Resolves a profile to its descriptor.
pub fn resolve(profile: Profile) -> &'static EnvironmentDescriptor {
    match profile {
        Profile::Prod => &PROD,
        Profile::Dev => &DEV,
        Profile::Local => &LOCAL,
    }
}

/// Resolves a raw profile name, returning `None` for names outside the registry.
pub fn resolve_name(name: &str) -> Option<&'static EnvironmentDescriptor> {
    Profile::from_name(name).map(resolve)
}
