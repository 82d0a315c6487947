//! Configuration documents.
//!
//! A config file is TOML:
//!
//! ```toml
//! [account]
//! api_key = "..."
//!
//! [app.Calculator]
//! command = "python calculator.py"
//! slug = "calc"
//! color = "#ffaa00"
//!
//! [terminal.Shell]
//! command = "bash"
//! ```
//!
//! Every field is optional except an app's `command`. A terminal without a
//! command runs the user's shell. Whatever the file leaves out is filled with
//! defaults, so a [`ConfigDocument`] is always complete.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::paths::default_shell;

/// Errors from loading a config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Nothing exists at the given path.
    #[error("config not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be read, parsed or validated.
    #[error("failed to load config from {}: {source}", .path.display())]
    Malformed {
        /// Path of the offending file.
        path: PathBuf,
        /// What went wrong.
        #[source]
        source: ConfigCause,
    },
}

/// Underlying cause of a malformed config.
#[derive(Error, Debug)]
pub enum ConfigCause {
    /// The file could not be read.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// The file is not valid TOML or has the wrong shape.
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The document parsed but an entry is unusable.
    #[error("invalid entry: {0}")]
    Invalid(String),
}

/// Result type alias for config loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Account section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    /// API key used when connecting; takes precedence over `--api-key`.
    pub api_key: Option<String>,
}

/// One app or terminal declared in the config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    /// Display name (the table key).
    pub name: String,
    /// URL slug; empty means the server assigns one.
    pub slug: String,
    /// Command that launches the app, or the shell for a terminal.
    pub command: String,
    /// Accent color shown by the server.
    pub color: Option<String>,
    /// Whether this entry is an interactive terminal.
    pub terminal: bool,
}

/// A fully populated configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigDocument {
    /// Account settings.
    pub account: AccountConfig,
    /// Declared apps followed by declared terminals.
    pub apps: Vec<AppConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDocument {
    account: AccountConfig,
    app: BTreeMap<String, RawEntry>,
    terminal: BTreeMap<String, RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    command: Option<String>,
    #[serde(default)]
    slug: String,
    color: Option<String>,
}

impl ConfigDocument {
    /// Parses a document from TOML text.
    pub fn from_toml(text: &str) -> std::result::Result<Self, ConfigCause> {
        let raw: RawDocument = toml::from_str(text)?;

        let mut apps = Vec::with_capacity(raw.app.len() + raw.terminal.len());
        for (name, entry) in raw.app {
            let command = match entry.command {
                Some(command) if !command.trim().is_empty() => command,
                _ => {
                    return Err(ConfigCause::Invalid(format!(
                        "app '{}' has no command",
                        name
                    )))
                }
            };
            apps.push(AppConfig::build(name, entry.slug, command, entry.color, false)?);
        }
        for (name, entry) in raw.terminal {
            let command = entry
                .command
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(default_shell);
            apps.push(AppConfig::build(name, entry.slug, command, entry.color, true)?);
        }

        Ok(Self {
            account: raw.account,
            apps,
        })
    }
}

impl AppConfig {
    fn build(
        name: String,
        slug: String,
        command: String,
        color: Option<String>,
        terminal: bool,
    ) -> std::result::Result<Self, ConfigCause> {
        if !is_valid_slug(&slug) {
            return Err(ConfigCause::Invalid(format!(
                "'{}' has an invalid slug '{}'",
                name, slug
            )));
        }
        Ok(Self {
            name,
            slug,
            command,
            color,
            terminal,
        })
    }
}

/// Slugs end up in URLs: ASCII letters, digits, `-` and `_` only.
fn is_valid_slug(slug: &str) -> bool {
    slug.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Loads a config document from `path`.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if the file does not exist, and
/// [`ConfigError::Malformed`] for every other failure.
pub fn load_from_path(path: &Path) -> Result<ConfigDocument> {
    debug!(path = %path.display(), "reading config");

    let text = fs::read_to_string(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound(path.to_path_buf())
        } else {
            ConfigError::Malformed {
                path: path.to_path_buf(),
                source: e.into(),
            }
        }
    })?;

    ConfigDocument::from_toml(&text).map_err(|source| ConfigError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// The document used when no config file is given.
pub fn default_document() -> ConfigDocument {
    ConfigDocument::default()
}

/// Expands `~` and makes a user-supplied config path absolute.
pub fn resolve_path(raw: &str) -> PathBuf {
    let expanded = PathBuf::from(shellexpand::tilde(raw).as_ref());
    std::path::absolute(&expanded).unwrap_or(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_matches_empty_file() {
        let file = write_config("");
        assert_eq!(load_from_path(file.path()).unwrap(), default_document());
    }

    #[test]
    fn test_default_matches_defaults_only_file() {
        let file = write_config("[account]\n\n[app]\n\n[terminal]\n");
        assert_eq!(load_from_path(file.path()).unwrap(), default_document());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        match load_from_path(&path) {
            Err(ConfigError::NotFound(p)) => assert_eq!(p, path),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_toml_is_malformed_with_cause() {
        let file = write_config("[account\napi_key = ");
        match load_from_path(file.path()) {
            Err(ConfigError::Malformed { path, source }) => {
                assert_eq!(path, file.path());
                assert!(matches!(source, ConfigCause::Parse(_)));
            }
            other => panic!("expected Malformed, got {:?}", other),
        }
    }

    #[test]
    fn test_directory_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_from_path(dir.path());
        assert!(matches!(
            result,
            Err(ConfigError::Malformed {
                source: ConfigCause::Io(_),
                ..
            })
        ));
    }

    #[test]
    fn test_full_document() {
        let file = write_config(
            r##"
[account]
api_key = "secret"

[app.Calculator]
command = "python calc.py"
slug = "calc"
color = "#ffaa00"

[app.Browser]
command = "browse"

[terminal.Shell]
command = "zsh"
slug = "sh"
"##,
        );
        let doc = load_from_path(file.path()).unwrap();
        assert_eq!(doc.account.api_key.as_deref(), Some("secret"));
        assert_eq!(doc.apps.len(), 3);

        // Apps sorted by name, terminals last.
        assert_eq!(doc.apps[0].name, "Browser");
        assert_eq!(doc.apps[0].slug, "");
        assert!(!doc.apps[0].terminal);
        assert_eq!(doc.apps[1].name, "Calculator");
        assert_eq!(doc.apps[1].color.as_deref(), Some("#ffaa00"));
        assert_eq!(doc.apps[2].name, "Shell");
        assert_eq!(doc.apps[2].command, "zsh");
        assert!(doc.apps[2].terminal);
    }

    #[test]
    fn test_terminal_without_command_uses_shell() {
        let doc = ConfigDocument::from_toml("[terminal.Shell]\n").unwrap();
        assert_eq!(doc.apps[0].command, default_shell());
        assert!(doc.apps[0].terminal);
    }

    #[test]
    fn test_app_without_command_is_invalid() {
        let result = ConfigDocument::from_toml("[app.Empty]\nslug = \"empty\"\n");
        assert!(matches!(result, Err(ConfigCause::Invalid(_))));
    }

    #[test]
    fn test_bad_slug_is_invalid() {
        let result = ConfigDocument::from_toml("[app.X]\ncommand = \"x\"\nslug = \"a b\"\n");
        assert!(matches!(result, Err(ConfigCause::Invalid(_))));
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        let result = ConfigDocument::from_toml("[account]\napi_key = 42\n");
        assert!(matches!(result, Err(ConfigCause::Parse(_))));
    }

    #[test]
    fn test_resolve_path_is_absolute() {
        assert!(resolve_path("webterm.toml").is_absolute());
        assert!(resolve_path("/etc/webterm.toml").ends_with("webterm.toml"));
    }
}
