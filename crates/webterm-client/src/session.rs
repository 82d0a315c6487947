//! Session registrations.

use serde::Serialize;
use webterm_core::AppConfig;

use crate::{ClientError, Result};

/// What a session publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    /// An interactive shell.
    Terminal,
    /// A launched application.
    Application,
}

/// A publishable unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRegistration {
    /// Terminal or application.
    pub kind: SessionKind,
    /// Display name.
    pub name: String,
    /// Launch command, or shell path for terminals.
    pub command: String,
    /// URL slug; empty means the server assigns one.
    pub slug: String,
    /// Accent color.
    pub color: Option<String>,
}

impl SessionRegistration {
    /// Create a terminal registration.
    pub fn terminal(
        name: impl Into<String>,
        command: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            kind: SessionKind::Terminal,
            name: name.into(),
            command: command.into(),
            slug: slug.into(),
            color: None,
        }
    }

    /// Create an application registration.
    pub fn application(
        name: impl Into<String>,
        command: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            kind: SessionKind::Application,
            name: name.into(),
            command: command.into(),
            slug: slug.into(),
            color: None,
        }
    }

    /// Sets the accent color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Whether this is a terminal session.
    pub fn is_terminal(&self) -> bool {
        self.kind == SessionKind::Terminal
    }
}

impl From<&AppConfig> for SessionRegistration {
    fn from(app: &AppConfig) -> Self {
        let registration = if app.terminal {
            Self::terminal(&app.name, &app.command, &app.slug)
        } else {
            Self::application(&app.name, &app.command, &app.slug)
        };
        match &app.color {
            Some(color) => registration.with_color(color),
            None => registration,
        }
    }
}

/// Sessions in registration order.
///
/// Names are unique, and so are non-empty slugs. A duplicate is rejected
/// rather than replacing the earlier entry.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Vec<SessionRegistration>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a session.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` or `DuplicateSlug` if the session clashes with
    /// one already registered; the registry is left unchanged.
    pub fn register(&mut self, session: SessionRegistration) -> Result<()> {
        if self.get(&session.name).is_some() {
            return Err(ClientError::DuplicateName(session.name));
        }
        if !session.slug.is_empty() && self.sessions.iter().any(|s| s.slug == session.slug) {
            return Err(ClientError::DuplicateSlug(session.slug));
        }
        self.sessions.push(session);
        Ok(())
    }

    /// Finds a session by name.
    pub fn get(&self, name: &str) -> Option<&SessionRegistration> {
        self.sessions.iter().find(|s| s.name == name)
    }

    /// Returns the number of registered sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns true if no sessions are registered.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Iterates in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &SessionRegistration> {
        self.sessions.iter()
    }

    /// Copies the sessions out in registration order.
    pub fn to_vec(&self) -> Vec<SessionRegistration> {
        self.sessions.clone()
    }
}
