//! Well-known locations and process defaults.
//!
//! # Environment Variables
//!
//! - `WEBTERM_CONFIG_DIR`: Override the config directory
//! - `SHELL`: Shell used for terminal sessions

use std::path::PathBuf;

/// Environment variable for custom config directory.
pub const CONFIG_DIR_ENV: &str = "WEBTERM_CONFIG_DIR";

/// Environment variable naming the user's shell.
pub const SHELL_ENV: &str = "SHELL";

/// Shell used when `SHELL` is unset.
pub const FALLBACK_SHELL: &str = "/bin/sh";

/// Default config directory name under home.
const DEFAULT_CONFIG_DIR: &str = ".webterm";

/// Get the webterm config directory.
///
/// The directory is determined by:
/// 1. `WEBTERM_CONFIG_DIR` environment variable if set
/// 2. `~/.webterm` if home directory is available
/// 3. `.webterm` in current directory as fallback
pub fn config_dir() -> PathBuf {
    std::env::var(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(DEFAULT_CONFIG_DIR))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR))
        })
}

/// Get the .env.local file path.
///
/// Environment file for secrets (API keys).
pub fn env_file() -> PathBuf {
    config_dir().join(".env.local")
}

/// The user's shell, or [`FALLBACK_SHELL`].
pub fn default_shell() -> String {
    std::env::var(SHELL_ENV)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_SHELL.to_string())
}
