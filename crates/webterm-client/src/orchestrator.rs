//! Client orchestrator: session registration and the publish loop.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};
use webterm_core::{ConfigDocument, EnvironmentDescriptor};

use crate::publisher::{PublishRequest, Publisher};
use crate::retry::Backoff;
use crate::session::{SessionRegistration, SessionRegistry};
use crate::websocket::WebSocketPublisher;
use crate::Result;

/// Owns the sessions to publish and the connection lifecycle.
///
/// Sessions are registered on one thread before [`run`](Self::run), which
/// consumes the orchestrator; nothing can register after hand-off.
pub struct ClientOrchestrator {
    environment: &'static EnvironmentDescriptor,
    config: ConfigDocument,
    api_key: Option<String>,
    root: PathBuf,
    sessions: SessionRegistry,
    publisher: Arc<dyn Publisher>,
    backoff: Backoff,
}

impl ClientOrchestrator {
    /// Create an orchestrator publishing to `environment`.
    ///
    /// Apps declared in `config` are registered immediately, in document order.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` / `DuplicateSlug` if the config declares
    /// clashing apps.
    pub fn new(
        environment: &'static EnvironmentDescriptor,
        config: ConfigDocument,
        api_key: Option<String>,
    ) -> Result<Self> {
        let mut sessions = SessionRegistry::new();
        for app in &config.apps {
            sessions.register(SessionRegistration::from(app))?;
        }

        Ok(Self {
            environment,
            config,
            api_key: api_key.filter(|k| !k.is_empty()),
            root: PathBuf::from("."),
            sessions,
            publisher: Arc::new(WebSocketPublisher::new()),
            backoff: Backoff::default(),
        })
    }

    /// Sets the working directory for launched commands.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Replaces the publisher.
    pub fn with_publisher(mut self, publisher: Arc<dyn Publisher>) -> Self {
        self.publisher = publisher;
        self
    }

    /// Replaces the reconnect backoff.
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Registers an interactive terminal.
    pub fn register_terminal(
        &mut self,
        label: impl Into<String>,
        shell_command: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Result<()> {
        let session = SessionRegistration::terminal(label, shell_command, identifier);
        debug!(name = %session.name, slug = %session.slug, "registering terminal");
        self.sessions.register(session)
    }

    /// Registers an application.
    pub fn register_application(
        &mut self,
        label: impl Into<String>,
        launch_command: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Result<()> {
        let session = SessionRegistration::application(label, launch_command, identifier);
        debug!(name = %session.name, slug = %session.slug, "registering application");
        self.sessions.register(session)
    }

    /// Number of sessions registered so far.
    pub fn pending_count(&self) -> usize {
        self.sessions.len()
    }

    /// Registered sessions in order.
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// The key sent to the server: the config's account key wins over the
    /// one given on the command line.
    pub fn api_key(&self) -> Option<&str> {
        self.config
            .account
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .or(self.api_key.as_deref())
    }

    /// The environment being published to.
    pub fn environment(&self) -> &'static EnvironmentDescriptor {
        self.environment
    }

    /// Working directory for launched commands.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn publish_request(&self) -> PublishRequest {
        PublishRequest {
            url: self.environment.url.to_string(),
            api_key: self.api_key().map(str::to_string),
            root: self.root.clone(),
            sessions: self.sessions.to_vec(),
        }
    }

    /// Publish until Ctrl-C or a fatal error.
    pub async fn run(self) -> Result<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Publish until `shutdown` completes or a fatal error occurs.
    ///
    /// Disconnections and retryable errors reconnect after a backoff delay.
    /// When `shutdown` fires, the in-flight connection is dropped.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let request = self.publish_request();
        let mut backoff = self.backoff.clone();
        info!(
            url = %request.url,
            sessions = request.sessions.len(),
            "publishing sessions"
        );

        tokio::pin!(shutdown);
        loop {
            let outcome = tokio::select! {
                _ = &mut shutdown => break,
                outcome = self.publisher.publish(&request) => outcome,
            };

            match outcome {
                Ok(()) => backoff.reset(),
                Err(e) if e.is_retryable() => {
                    if backoff.attempts() == 0 {
                        warn!(error = %e, "unable to connect; will reattempt connection soon");
                    } else {
                        debug!(error = %e, attempt = backoff.attempts(), "unable to connect");
                    }
                }
                Err(e) => return Err(e),
            }

            let delay = backoff.next_delay();
            tokio::select! {
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        info!("exit requested");
        Ok(())
    }
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;
    use webterm_core::{resolve, AccountConfig, AppConfig, Profile};

    /// Records each request and replays scripted results.
    struct ScriptedPublisher {
        calls: AtomicUsize,
        results: Mutex<Vec<Result<()>>>,
        seen: Mutex<Vec<PublishRequest>>,
    }

    impl ScriptedPublisher {
        fn new(results: Vec<Result<()>>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                results: Mutex::new(results),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Publisher for ScriptedPublisher {
        async fn publish(&self, request: &PublishRequest) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(request.clone());
            let next = {
                let mut results = self.results.lock().unwrap();
                if results.is_empty() {
                    None
                } else {
                    Some(results.remove(0))
                }
            };
            match next {
                Some(result) => result,
                None => std::future::pending().await,
            }
        }
    }

    fn orchestrator(config: ConfigDocument) -> ClientOrchestrator {
        ClientOrchestrator::new(resolve(Profile::Local), config, None).unwrap()
    }

    fn app(name: &str, slug: &str, terminal: bool) -> AppConfig {
        AppConfig {
            name: name.to_string(),
            slug: slug.to_string(),
            command: "run".to_string(),
            color: None,
            terminal,
        }
    }

    #[test]
    fn test_new_is_empty_with_default_config() {
        let client = orchestrator(ConfigDocument::default());
        assert_eq!(client.pending_count(), 0);
        assert_eq!(client.root(), Path::new("."));
    }

    #[test]
    fn test_config_apps_are_registered() {
        let config = ConfigDocument {
            account: AccountConfig::default(),
            apps: vec![app("One", "one", false), app("Shell", "", true)],
        };
        let client = orchestrator(config);
        assert_eq!(client.pending_count(), 2);
        assert!(client.sessions().get("Shell").unwrap().is_terminal());
    }

    #[test]
    fn test_config_slug_clash_is_error() {
        let config = ConfigDocument {
            account: AccountConfig::default(),
            apps: vec![app("One", "x", false), app("Two", "x", true)],
        };
        let result = ClientOrchestrator::new(resolve(Profile::Local), config, None);
        assert!(matches!(result, Err(ClientError::DuplicateSlug(_))));
    }

    #[test]
    fn test_register_counts() {
        let mut client = orchestrator(ConfigDocument::default());
        client
            .register_terminal("Terminal", "/bin/sh", "abcdef")
            .unwrap();
        assert_eq!(client.pending_count(), 1);
        client
            .register_application("Welcome", "webterm --welcome", "welcome")
            .unwrap();
        assert_eq!(client.pending_count(), 2);
        assert!(client.register_application("Welcome", "x", "").is_err());
        assert_eq!(client.pending_count(), 2);
    }

    #[test]
    fn test_api_key_precedence() {
        let client = ClientOrchestrator::new(
            resolve(Profile::Local),
            ConfigDocument::default(),
            Some("cli".to_string()),
        )
        .unwrap();
        assert_eq!(client.api_key(), Some("cli"));

        let config = ConfigDocument {
            account: AccountConfig {
                api_key: Some("file".to_string()),
            },
            apps: Vec::new(),
        };
        let client =
            ClientOrchestrator::new(resolve(Profile::Local), config, Some("cli".to_string()))
                .unwrap();
        assert_eq!(client.api_key(), Some("file"));

        let client = ClientOrchestrator::new(
            resolve(Profile::Local),
            ConfigDocument::default(),
            Some(String::new()),
        )
        .unwrap();
        assert_eq!(client.api_key(), None);
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let publisher = ScriptedPublisher::new(Vec::new());
        let mut client = orchestrator(ConfigDocument::default())
            .with_publisher(publisher.clone())
            .with_root("/srv/apps");
        client.register_terminal("Terminal", "/bin/sh", "t").unwrap();

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let handle = tokio::spawn(client.run_until(async {
            let _ = rx.await;
        }));

        tokio::time::sleep(Duration::from_millis(20)).await;
        tx.send(()).unwrap();
        handle.await.unwrap().unwrap();

        assert_eq!(publisher.calls.load(Ordering::SeqCst), 1);
        let seen = publisher.seen.lock().unwrap();
        assert_eq!(seen[0].url, resolve(Profile::Local).url);
        assert_eq!(seen[0].root, PathBuf::from("/srv/apps"));
        assert_eq!(seen[0].sessions.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_reconnects_after_errors() {
        let publisher = ScriptedPublisher::new(vec![
            Err(ClientError::Publish("refused".to_string())),
            Ok(()),
            Err(ClientError::Publish("refused".to_string())),
        ]);
        let client = orchestrator(ConfigDocument::default())
            .with_publisher(publisher.clone())
            .with_backoff(Backoff::new(Duration::from_millis(10), Duration::from_millis(40)));

        let result = client
            .run_until(tokio::time::sleep(Duration::from_secs(5)))
            .await;

        assert!(result.is_ok());
        // Three scripted results, then a fourth call that hangs until shutdown.
        assert_eq!(publisher.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_run_returns_fatal_error() {
        let publisher =
            ScriptedPublisher::new(vec![Err(ClientError::Rejected("401".to_string()))]);
        let client = orchestrator(ConfigDocument::default()).with_publisher(publisher.clone());

        let result = client.run_until(std::future::pending()).await;

        assert!(matches!(result, Err(ClientError::Rejected(_))));
        assert_eq!(publisher.calls.load(Ordering::SeqCst), 1);
    }
}
