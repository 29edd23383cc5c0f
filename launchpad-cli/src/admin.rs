//! Server configuration manager
//!
//! Edits the catalog service remotely: the manifest document, the serving
//! port, and a restart followed by a reconnect on the new port.

use launchpad_client::ClientError;
use launchpad_core::domain::server::ServerRuntimeConfig;
use launchpad_core::endpoint::ADMIN_UI_PATH;
use reqwest::Url;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::repository::AdminRepository;
use crate::workflow::{Notification, Notifier};

/// How long to wait after a restart request before reconnecting
pub const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Status shown while the service restarts
pub const RESTART_COUNTDOWN: &str = "Server is restarting. Reconnecting in 5 seconds...";

#[derive(Debug, Error)]
pub enum AdminError {
    /// The edited manifest is not JSON; nothing was sent
    #[error("Invalid JSON format: {0}")]
    InvalidManifest(String),

    #[error("Invalid port: {0}")]
    InvalidPort(String),

    #[error("Invalid admin URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("{0}")]
    Client(#[from] ClientError),
}

pub type Result<T> = std::result::Result<T, AdminError>;

/// Where the session goes once a restart has been requested
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &Url);
}

/// One admin editing session against a catalog service
pub struct AdminSession {
    repository: Arc<dyn AdminRepository>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    base: Url,
    manifest: String,
    current_port: String,
    status: String,
}

impl AdminSession {
    /// Opens a session against the service at `admin_url`
    ///
    /// Nothing is fetched until [`AdminSession::load`].
    pub fn new(
        repository: Arc<dyn AdminRepository>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        admin_url: &str,
    ) -> Result<Self> {
        let base = Url::parse(admin_url).map_err(|e| AdminError::InvalidUrl {
            url: admin_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            repository,
            navigator,
            notifier,
            base,
            manifest: String::new(),
            current_port: String::new(),
            status: String::new(),
        })
    }

    /// Scheme, host and port the admin API lives under
    pub fn api_base(&self) -> String {
        self.base.origin().ascii_serialization()
    }

    pub fn manifest(&self) -> &str {
        &self.manifest
    }

    /// The port the service is believed to be configured with
    pub fn current_port(&self) -> &str {
        &self.current_port
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Fetch the manifest and the runtime config
    ///
    /// The manifest is pretty-printed for editing when it parses as JSON.
    pub async fn load(&mut self) -> Result<()> {
        let api_base = self.api_base();

        let loaded = async {
            let raw = self.repository.get_manifest(&api_base).await?;
            let config = self.repository.get_server_config(&api_base).await?;
            Ok::<_, ClientError>((raw, config))
        }
        .await;

        match loaded {
            Ok((raw, config)) => {
                self.manifest = pretty_manifest(&raw);
                self.current_port = config.port;
                debug!("Admin session loaded from {}", api_base);
                Ok(())
            }
            Err(e) => self.fail("Loading server settings failed", e.into()),
        }
    }

    /// Validate `text` locally and submit it as the new manifest
    pub async fn save_manifest(&mut self, text: &str) -> Result<String> {
        if let Err(e) = serde_json::from_str::<serde_json::Value>(text) {
            return self.fail(
                "Saving the manifest failed",
                AdminError::InvalidManifest(e.to_string()),
            );
        }

        match self.repository.put_manifest(&self.api_base(), text).await {
            Ok(reply) => {
                self.manifest = text.to_string();
                self.set_status(reply.clone());
                Ok(reply)
            }
            Err(e) => self.fail("Saving the manifest failed", e.into()),
        }
    }

    /// Submit a new serving port
    ///
    /// On success the current port becomes `port` without re-fetching.
    pub async fn save_port(&mut self, port: &str) -> Result<String> {
        let config = ServerRuntimeConfig::new(port);

        match self
            .repository
            .put_server_config(&self.api_base(), &config)
            .await
        {
            Ok(reply) => {
                self.current_port = port.to_string();
                self.set_status(reply.clone());
                Ok(reply)
            }
            Err(e) => self.fail("Saving the port failed", e.into()),
        }
    }

    /// Request a restart, wait, then navigate to the admin UI on the current port
    ///
    /// Best effort: the new address is not probed before navigating. A port
    /// that cannot be reconnected to fails before the restart is requested.
    pub async fn restart(&mut self) -> Result<Url> {
        let target = match reconnect_url(&self.base, &self.current_port) {
            Ok(target) => target,
            Err(e) => return self.fail("Restart failed", e),
        };

        if let Err(e) = self.repository.restart_server(&self.api_base()).await {
            return self.fail("Restart failed", e.into());
        }

        self.set_status(RESTART_COUNTDOWN.to_string());
        tokio::time::sleep(RECONNECT_DELAY).await;

        info!("Reconnecting to {}", target);
        self.navigator.navigate(&target);
        Ok(target)
    }

    fn set_status(&mut self, status: String) {
        self.notifier.status_changed(&status);
        self.status = status;
    }

    /// Shows `err` in the status line and raises it as a notification
    fn fail<T>(&mut self, title: &str, err: AdminError) -> Result<T> {
        let message = err.to_string();
        warn!("{}: {}", title, message);

        self.set_status(message.clone());
        self.notifier.notify(&Notification::failure(title, message));
        Err(err)
    }
}

/// Same scheme and host as `base`, with `port` and the admin UI path
pub fn reconnect_url(base: &Url, port: &str) -> Result<Url> {
    let port: u16 = port
        .trim()
        .parse()
        .map_err(|_| AdminError::InvalidPort(port.to_string()))?;

    let mut url = base.clone();
    url.set_port(Some(port)).map_err(|_| AdminError::InvalidUrl {
        url: base.to_string(),
        reason: "URL cannot carry a port".to_string(),
    })?;
    url.set_path(ADMIN_UI_PATH);
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}

fn pretty_manifest(raw: &str) -> String {
    serde_json::from_str::<serde_json::Value>(raw)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::Outcome;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeAdmin {
        manifest_puts: Mutex<Vec<String>>,
        config_puts: Mutex<Vec<ServerRuntimeConfig>>,
        restarts: Mutex<Vec<String>>,
        reject_manifest: bool,
    }

    #[async_trait]
    impl AdminRepository for FakeAdmin {
        async fn get_manifest(&self, _admin_url: &str) -> launchpad_client::Result<String> {
            Ok(r#"[{"name":"demo"}]"#.to_string())
        }

        async fn put_manifest(
            &self,
            _admin_url: &str,
            manifest: &str,
        ) -> launchpad_client::Result<String> {
            self.manifest_puts.lock().unwrap().push(manifest.to_string());
            if self.reject_manifest {
                return Err(ClientError::api_error(400, "Invalid JSON format"));
            }
            Ok("Manifest updated successfully".to_string())
        }

        async fn get_server_config(
            &self,
            _admin_url: &str,
        ) -> launchpad_client::Result<ServerRuntimeConfig> {
            Ok(ServerRuntimeConfig::new("8080"))
        }

        async fn put_server_config(
            &self,
            _admin_url: &str,
            config: &ServerRuntimeConfig,
        ) -> launchpad_client::Result<String> {
            self.config_puts.lock().unwrap().push(config.clone());
            Ok("Config updated successfully. Please restart the server to apply changes.".to_string())
        }

        async fn restart_server(&self, admin_url: &str) -> launchpad_client::Result<String> {
            self.restarts.lock().unwrap().push(admin_url.to_string());
            Ok("Server is restarting...".to_string())
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        visited: Mutex<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, url: &Url) {
            self.visited.lock().unwrap().push(url.to_string());
        }
    }

    struct Silent;

    impl Notifier for Silent {
        fn notify(&self, _notification: &Notification) {}
    }

    #[derive(Default)]
    struct RecordingNotifier {
        notifications: Mutex<Vec<Notification>>,
        statuses: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        fn failures(&self) -> Vec<Notification> {
            self.notifications
                .lock()
                .unwrap()
                .iter()
                .filter(|n| n.outcome == Outcome::Failure)
                .cloned()
                .collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: &Notification) {
            self.notifications.lock().unwrap().push(notification.clone());
        }

        fn status_changed(&self, status: &str) {
            self.statuses.lock().unwrap().push(status.to_string());
        }
    }

    fn session(
        admin: Arc<FakeAdmin>,
        navigator: Arc<RecordingNavigator>,
        url: &str,
    ) -> AdminSession {
        AdminSession::new(admin, navigator, Arc::new(Silent), url).unwrap()
    }

    fn recorded_session(
        admin: Arc<FakeAdmin>,
        navigator: Arc<RecordingNavigator>,
    ) -> (AdminSession, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let session =
            AdminSession::new(admin, navigator, notifier.clone(), "http://example.test:8080")
                .unwrap();
        (session, notifier)
    }

    #[tokio::test]
    async fn test_load_pretty_prints_manifest() {
        let admin = Arc::new(FakeAdmin::default());
        let mut session = session(admin, Arc::default(), "http://example.test:8080");

        session.load().await.unwrap();

        assert_eq!(session.manifest(), "[\n  {\n    \"name\": \"demo\"\n  }\n]");
        assert_eq!(session.current_port(), "8080");
    }

    #[tokio::test]
    async fn test_invalid_manifest_is_never_sent() {
        let admin = Arc::new(FakeAdmin::default());
        let mut session = session(admin.clone(), Arc::default(), "http://example.test:8080");

        let err = session.save_manifest("[{\"name\": ").await.unwrap_err();

        assert!(matches!(err, AdminError::InvalidManifest(_)));
        assert!(session.status().starts_with("Invalid JSON format"));
        assert!(admin.manifest_puts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_manifest_rejection_shows_server_text() {
        let admin = Arc::new(FakeAdmin {
            reject_manifest: true,
            ..Default::default()
        });
        let mut session = session(admin.clone(), Arc::default(), "http://example.test:8080");

        session.save_manifest("[]").await.unwrap_err();

        assert!(session.status().contains("Invalid JSON format"));
        assert_eq!(admin.manifest_puts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_manifest_failures_notify_once_each() {
        let admin = Arc::new(FakeAdmin {
            reject_manifest: true,
            ..Default::default()
        });
        let (mut session, notifier) = recorded_session(admin, Arc::default());

        session.save_manifest("not json").await.unwrap_err();
        assert_eq!(notifier.failures().len(), 1);

        session.save_manifest("[]").await.unwrap_err();
        let failures = notifier.failures();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[1].title, "Saving the manifest failed");
        assert!(failures[1].message.contains("Invalid JSON format"));
        assert_eq!(
            notifier.statuses.lock().unwrap().last().map(String::as_str),
            Some(session.status())
        );
    }

    #[tokio::test]
    async fn test_restart_without_loaded_port_fails_visibly() {
        let admin = Arc::new(FakeAdmin::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let (mut session, notifier) = recorded_session(admin.clone(), navigator.clone());

        let err = session.restart().await.unwrap_err();

        assert!(matches!(err, AdminError::InvalidPort(_)));
        assert!(session.status().starts_with("Invalid port"));
        let failures = notifier.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].title, "Restart failed");
        assert!(admin.restarts.lock().unwrap().is_empty());
        assert!(navigator.visited.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_restart_with_unusable_port_fails_visibly() {
        let admin = Arc::new(FakeAdmin::default());
        let (mut session, notifier) = recorded_session(admin.clone(), Arc::default());
        session.save_port("eighty").await.unwrap();

        let err = session.restart().await.unwrap_err();

        assert!(matches!(err, AdminError::InvalidPort(ref port) if port == "eighty"));
        assert_eq!(session.status(), "Invalid port: eighty");
        assert_eq!(notifier.failures().len(), 1);
        assert!(admin.restarts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_manifest() {
        let admin = Arc::new(FakeAdmin::default());
        let mut session = session(admin.clone(), Arc::default(), "http://example.test:8080");

        let reply = session.save_manifest("[]").await.unwrap();

        assert_eq!(reply, "Manifest updated successfully");
        assert_eq!(session.status(), "Manifest updated successfully");
        assert_eq!(*admin.manifest_puts.lock().unwrap(), vec!["[]".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_port_change_and_restart_reconnects_on_new_port() {
        let admin = Arc::new(FakeAdmin::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let mut session = session(
            admin.clone(),
            navigator.clone(),
            "http://example.test:8080/admin/?tab=port",
        );
        session.load().await.unwrap();

        session.save_port("9090").await.unwrap();
        assert_eq!(session.current_port(), "9090");
        assert_eq!(admin.config_puts.lock().unwrap()[0].port, "9090");

        let started = tokio::time::Instant::now();
        let target = session.restart().await.unwrap();

        assert!(started.elapsed() >= RECONNECT_DELAY);
        assert_eq!(target.as_str(), "http://example.test:9090/admin/");
        assert_eq!(session.status(), RESTART_COUNTDOWN);
        assert_eq!(
            *admin.restarts.lock().unwrap(),
            vec!["http://example.test:8080".to_string()]
        );
        assert_eq!(
            *navigator.visited.lock().unwrap(),
            vec!["http://example.test:9090/admin/".to_string()]
        );
    }

    #[test]
    fn test_reconnect_url_rejects_bad_port() {
        let base = Url::parse("https://example.test").unwrap();

        assert!(matches!(
            reconnect_url(&base, "eighty"),
            Err(AdminError::InvalidPort(_))
        ));
        assert_eq!(
            reconnect_url(&base, "8443").unwrap().as_str(),
            "https://example.test:8443/admin/"
        );
    }

    #[test]
    fn test_new_rejects_unparsable_url() {
        let result = AdminSession::new(
            Arc::new(FakeAdmin::default()),
            Arc::new(RecordingNavigator::default()),
            Arc::new(Silent),
            "not a url",
        );

        assert!(matches!(result, Err(AdminError::InvalidUrl { .. })));
    }
}
