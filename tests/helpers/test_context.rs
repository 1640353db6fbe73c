//! Test context for unified test setup
//!
//! This module provides a unified test context that wires the services to a
//! mock backend and keeps the session file and exports in a temporary
//! directory.

use std::path::PathBuf;
use std::sync::Once;

use eventdesk::config::Settings;
use eventdesk::models::{Identity, Role};
use eventdesk::services::{NotificationKind, ServiceFactory};
use tempfile::TempDir;

use super::backend_mock::BackendMockServer;
use super::test_data::test_identity;

static INIT: Once = Once::new();

/// Initialize logging for tests (called once)
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("eventdesk=debug")
            .with_test_writer()
            .try_init();
    });
}

/// Unified test context that manages all test components
pub struct TestContext {
    pub backend: BackendMockServer,
    pub settings: Settings,
    pub services: ServiceFactory,
    pub temp_dir: TempDir,
}

impl TestContext {
    /// Create a new test context with a fresh backend and an empty session
    pub async fn new() -> Self {
        init_test_logging();

        let backend = BackendMockServer::new().await;
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let settings = test_settings(&backend.base_url(), &temp_dir);
        let services = ServiceFactory::from_settings(settings.clone()).expect("Failed to build services");

        Self {
            backend,
            settings,
            services,
            temp_dir,
        }
    }

    /// Services over the same session file, as after a restart
    pub fn restarted(&self) -> ServiceFactory {
        ServiceFactory::from_settings(self.settings.clone()).expect("Failed to build services")
    }

    pub fn session_file(&self) -> PathBuf {
        self.settings.session.storage_path.clone()
    }

    pub fn export_dir(&self) -> PathBuf {
        self.settings.export.output_dir.clone()
    }

    /// Establish a session for `role` without going through the login endpoint
    pub async fn sign_in_as(&self, role: Role) -> Identity {
        let identity = test_identity(role);
        self.services
            .session()
            .establish(identity.clone(), format!("token-{}", role.as_str()))
            .await
            .expect("Failed to establish session");
        identity
    }

    /// Messages currently shown, oldest first
    pub fn notifications(&self) -> Vec<(NotificationKind, String)> {
        self.services
            .notifications
            .visible()
            .into_iter()
            .map(|n| (n.kind, n.message))
            .collect()
    }

    pub fn last_notification(&self) -> Option<(NotificationKind, String)> {
        self.notifications().pop()
    }
}

/// Settings pointing at `base_url`, with state kept under `temp_dir`
pub fn test_settings(base_url: &str, temp_dir: &TempDir) -> Settings {
    let mut settings = Settings::default();
    settings.api.base_url = base_url.to_string();
    settings.api.timeout_seconds = 5;
    settings.session.storage_path = temp_dir.path().join("session.json");
    settings.session.verify_on_restore = true;
    // Long enough that nothing expires while a test inspects the queue
    settings.notifications.display_duration_ms = 60_000;
    settings.export.output_dir = temp_dir.path().join("exports");
    settings.logging.directory = temp_dir.path().join("logs");
    settings
}
