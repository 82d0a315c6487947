//! Process-wide names and defaults.

/// Enables debug logging and the resolved-config dump when set.
pub const DEBUG_ENV: &str = "WEBTERM_DEBUG";

/// Default value for `--api-key`.
pub const API_KEY_ENV: &str = "WEBTERM_API_KEY";

pub use webterm_core::environment::ENVIRONMENT_ENV;

/// Label of the terminal registered by `--terminal`.
pub const TERMINAL_NAME: &str = "Terminal";

/// Example app published when nothing else is.
pub const WELCOME_APP_NAME: &str = "Welcome";

/// Command launching the example app.
pub const WELCOME_APP_COMMAND: &str = "webterm --welcome";

/// Slug of the example app.
pub const WELCOME_APP_SLUG: &str = "welcome";

/// Crate version, reported at startup.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// True when `WEBTERM_DEBUG` is set to anything but an empty, `0` or `false`
/// value.
pub fn debug_enabled() -> bool {
    std::env::var(DEBUG_ENV)
        .map(|v| is_truthy(&v))
        .unwrap_or(false)
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false"))
}
