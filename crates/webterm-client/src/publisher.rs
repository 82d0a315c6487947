//! The seam between the orchestrator and the wire.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::session::SessionRegistration;
use crate::Result;

/// Everything a publisher needs for one connection.
#[derive(Debug, Clone)]
pub struct PublishRequest {
    /// WebSocket URL of the backend.
    pub url: String,
    /// Credential sent with the connection, if any.
    pub api_key: Option<String>,
    /// Working directory for launched commands.
    pub root: PathBuf,
    /// Sessions to declare, in registration order.
    pub sessions: Vec<SessionRegistration>,
}

/// Publishes sessions over one connection.
///
/// `publish` returns `Ok(())` when the connection ends normally; the caller
/// reconnects. Dropping the returned future must close the connection.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Connect, declare the sessions and serve until disconnected.
    async fn publish(&self, request: &PublishRequest) -> Result<()>;
}
