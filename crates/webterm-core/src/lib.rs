//! Webterm Core - shared building blocks for the webterm CLI.
//!
//! - **environment**: Closed registry of backend profiles
//! - **config**: Config file loading and defaults
//! - **identity**: Random identities for session slugs
//! - **paths**: Config directory and shell defaults

pub mod config;
pub mod environment;
pub mod identity;
pub mod paths;

pub use config::{
    default_document, load_from_path, AccountConfig, AppConfig, ConfigCause, ConfigDocument,
    ConfigError,
};
pub use environment::{resolve, resolve_name, EnvironmentDescriptor, Profile};
pub use paths::{config_dir, default_shell, env_file};
