//! Default publisher over a WebSocket.

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::{HeaderValue, StatusCode};
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tracing::{debug, info, warn};

use crate::publisher::{PublishRequest, Publisher};
use crate::session::{SessionKind, SessionRegistration};
use crate::{ClientError, Result};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "webterm-api-key";

/// Declares sessions to the backend and relays its log messages.
#[derive(Debug, Default, Clone)]
pub struct WebSocketPublisher;

impl WebSocketPublisher {
    /// Create a new publisher.
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientMessage<'a> {
    DeclareApps { apps: Vec<DeclaredApp<'a>> },
}

#[derive(Debug, Serialize)]
struct DeclaredApp<'a> {
    name: &'a str,
    slug: &'a str,
    color: Option<&'a str>,
    terminal: bool,
}

impl<'a> From<&'a SessionRegistration> for DeclaredApp<'a> {
    fn from(session: &'a SessionRegistration) -> Self {
        Self {
            name: &session.name,
            slug: &session.slug,
            color: session.color.as_deref(),
            terminal: session.kind == SessionKind::Terminal,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ServerMessage {
    Log { message: String },
    Info { message: String },
    #[serde(other)]
    Unknown,
}

fn classify(error: WsError) -> ClientError {
    match error {
        WsError::Http(response)
            if matches!(
                response.status(),
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
            ) =>
        {
            ClientError::Rejected(response.status().to_string())
        }
        WsError::Url(e) => ClientError::InvalidRequest(e.to_string()),
        WsError::HttpFormat(e) => ClientError::InvalidRequest(e.to_string()),
        other => ClientError::Publish(other.to_string()),
    }
}

fn handle_text(text: &str) {
    match serde_json::from_str::<ServerMessage>(text) {
        Ok(ServerMessage::Log { message }) => debug!(message = %message, "server log"),
        Ok(ServerMessage::Info { message }) => info!(message = %message, "server"),
        Ok(ServerMessage::Unknown) => debug!(text = %text, "ignoring server message"),
        Err(e) => warn!(error = %e, "unable to decode server message"),
    }
}

#[async_trait]
impl Publisher for WebSocketPublisher {
    async fn publish(&self, request: &PublishRequest) -> Result<()> {
        let mut ws_request = request
            .url
            .as_str()
            .into_client_request()
            .map_err(classify)?;
        if let Some(key) = &request.api_key {
            let value = HeaderValue::from_str(key).map_err(|_| {
                ClientError::InvalidRequest("api key is not a valid header value".to_string())
            })?;
            ws_request.headers_mut().insert(API_KEY_HEADER, value);
        }

        let (stream, _) = connect_async(ws_request).await.map_err(classify)?;
        info!(url = %request.url, "connected");
        let (mut write, mut read) = stream.split();

        let declare = ClientMessage::DeclareApps {
            apps: request.sessions.iter().map(DeclaredApp::from).collect(),
        };
        let payload =
            serde_json::to_string(&declare).map_err(|e| ClientError::Publish(e.to_string()))?;
        write.send(Message::Text(payload)).await.map_err(classify)?;
        debug!(apps = request.sessions.len(), "declared apps");

        while let Some(message) = read.next().await {
            match message.map_err(classify)? {
                Message::Text(text) => handle_text(&text),
                Message::Ping(data) => write.send(Message::Pong(data)).await.map_err(classify)?,
                Message::Close(_) => break,
                _ => {}
            }
        }

        info!("disconnected");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_apps_shape() {
        let sessions = vec![
            SessionRegistration::terminal("Terminal", "/bin/sh", "abc"),
            SessionRegistration::application("Welcome", "webterm --welcome", "welcome")
                .with_color("#123456"),
        ];
        let message = ClientMessage::DeclareApps {
            apps: sessions.iter().map(DeclaredApp::from).collect(),
        };
        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(value["type"], "declare_apps");
        assert_eq!(value["apps"][0]["terminal"], true);
        assert_eq!(value["apps"][1]["slug"], "welcome");
        assert_eq!(value["apps"][1]["color"], "#123456");
    }

    #[test]
    fn test_server_message_decoding() {
        let info: ServerMessage =
            serde_json::from_str(r#"{"type":"info","message":"hello"}"#).unwrap();
        assert!(matches!(info, ServerMessage::Info { message } if message == "hello"));

        let unknown: ServerMessage = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();
        assert!(matches!(unknown, ServerMessage::Unknown));
    }

    #[test]
    fn test_invalid_url_is_not_retried() {
        let error = "not a url".into_client_request().map_err(classify).unwrap_err();
        assert!(matches!(error, ClientError::InvalidRequest(_)));
        assert!(!error.is_retryable());
    }
}
