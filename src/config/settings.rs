//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub notifications: NotificationConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
    /// Log every backend call with its status and duration
    pub log_requests: bool,
}

/// Session persistence configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    pub storage_path: PathBuf,
    /// Re-fetch the cached identity from the backend on restore
    pub verify_on_restore: bool,
}

/// Notification display configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationConfig {
    pub display_duration_ms: u64,
}

/// Participant export configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    /// chrono format string for the event date cell
    pub date_format: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: PathBuf,
    pub file_prefix: String,
}

impl Settings {
    /// Load settings from `eventdesk.toml` (optional) and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load(None)
    }

    /// Load settings, reading the given file instead of `eventdesk.toml`
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("eventdesk").required(false),
        };

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("EVENTDESK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::EventDeskError> {
        super::validation::validate_settings(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_seconds)
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notifications.display_duration_ms)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:5000/api".to_string(),
                timeout_seconds: 30,
                user_agent: format!("EventDesk/{}", env!("CARGO_PKG_VERSION")),
                log_requests: true,
            },
            session: SessionConfig {
                storage_path: PathBuf::from(".eventdesk/session.json"),
                verify_on_restore: false,
            },
            notifications: NotificationConfig {
                display_duration_ms: 3000,
            },
            export: ExportConfig {
                output_dir: PathBuf::from("."),
                date_format: "%-m/%-d/%Y".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                directory: PathBuf::from(".eventdesk/logs"),
                file_prefix: "eventdesk.log".to_string(),
            },
        }
    }
}
