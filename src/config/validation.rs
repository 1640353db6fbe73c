//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{EventDeskError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_session_config(&settings.session)?;
    validate_notification_config(&settings.notifications)?;
    validate_export_config(&settings.export)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate backend API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(EventDeskError::Config(
            "API base URL is required".to_string()
        ));
    }

    let url = url::Url::parse(&config.base_url)?;
    if url.cannot_be_a_base() {
        return Err(EventDeskError::Config(
            format!("API base URL cannot be used as a base: {}", config.base_url)
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(EventDeskError::Config(
            "API timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate session persistence configuration
fn validate_session_config(config: &super::SessionConfig) -> Result<()> {
    if config.storage_path.as_os_str().is_empty() {
        return Err(EventDeskError::Config(
            "Session storage path is required".to_string()
        ));
    }

    Ok(())
}

/// Validate notification configuration
fn validate_notification_config(config: &super::NotificationConfig) -> Result<()> {
    if config.display_duration_ms == 0 {
        return Err(EventDeskError::Config(
            "Notification display duration must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate export configuration
fn validate_export_config(config: &super::ExportConfig) -> Result<()> {
    if config.date_format.is_empty() {
        return Err(EventDeskError::Config(
            "Export date format is required".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(EventDeskError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(EventDeskError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
