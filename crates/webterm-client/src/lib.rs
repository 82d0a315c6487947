//! Publishing client for webterm.
//!
//! This crate owns the sessions a process publishes and the loop that keeps
//! them published:
//! - `SessionRegistry` - ordered, duplicate-free session registrations
//! - `ClientOrchestrator` - registration surface plus the long-running `run`
//! - `Publisher` - the connection seam; `WebSocketPublisher` is the default
//!
//! # Example
//!
//! ```no_run
//! use webterm_client::ClientOrchestrator;
//! use webterm_core::{default_document, resolve, Profile};
//!
//! # async fn example() -> webterm_client::Result<()> {
//! let mut client = ClientOrchestrator::new(resolve(Profile::Prod), default_document(), None)?;
//! client.register_terminal("Terminal", "/bin/sh", "x1y2z3")?;
//! assert_eq!(client.pending_count(), 1);
//!
//! // Blocks until Ctrl-C.
//! client.run().await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod orchestrator;
pub mod publisher;
pub mod retry;
pub mod session;
pub mod websocket;

pub use error::{ClientError, Result};
pub use orchestrator::ClientOrchestrator;
pub use publisher::{PublishRequest, Publisher};
pub use retry::Backoff;
pub use session::{SessionKind, SessionRegistration, SessionRegistry};
pub use websocket::WebSocketPublisher;
