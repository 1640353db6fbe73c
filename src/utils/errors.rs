//! Error handling for EventDesk
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for EventDesk application
#[derive(Error, Debug)]
pub enum EventDeskError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration load error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("{0}")]
    Validation(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Normalized failure of a backend call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never got a response (connect failure, timeout, DNS...)
    #[error("No response from server. Please check if backend is running.")]
    NoResponse { reason: String },

    /// The backend answered with an error status
    #[error("{}", server_message(.status_code, .message))]
    Server { status_code: u16, message: Option<String> },

    /// The backend answered with a success status but an unreadable body
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

fn server_message(status_code: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("Server error: {}", status_code),
    }
}

/// Spreadsheet export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No participants to export")]
    NothingToExport,

    #[error("Workbook construction failed: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for EventDesk operations
pub type Result<T> = std::result::Result<T, EventDeskError>;

/// Result type alias for backend calls
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Result type alias for export operations
pub type ExportResult<T> = std::result::Result<T, ExportError>;

impl ApiError {
    /// HTTP status code, when a response was received
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Server { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// True when no response reached the client
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::NoResponse { .. })
    }

    /// Message supplied by the backend body, if any
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(401)
    }

    /// Backend message when present, otherwise the caller's fallback
    pub fn message_or(&self, fallback: &str) -> String {
        self.backend_message().unwrap_or(fallback).to_string()
    }
}

impl EventDeskError {
    /// Check if the error is recoverable by retrying the user action
    pub fn is_recoverable(&self) -> bool {
        match self {
            EventDeskError::Api(e) => e.is_network() || e.status_code().map_or(false, |code| code >= 500),
            EventDeskError::Export(ExportError::NothingToExport) => false,
            EventDeskError::Export(_) => true,
            EventDeskError::Config(_) => false,
            EventDeskError::ConfigLoad(_) => false,
            EventDeskError::Validation(_) => false,
            EventDeskError::NotAuthenticated => false,
            EventDeskError::PermissionDenied(_) => false,
            EventDeskError::Http(_) => true,
            EventDeskError::Serialization(_) => false,
            EventDeskError::Io(_) => true,
            EventDeskError::UrlParse(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EventDeskError::Config(_) => ErrorSeverity::Critical,
            EventDeskError::ConfigLoad(_) => ErrorSeverity::Critical,
            EventDeskError::NotAuthenticated => ErrorSeverity::Warning,
            EventDeskError::PermissionDenied(_) => ErrorSeverity::Warning,
            EventDeskError::Validation(_) => ErrorSeverity::Info,
            EventDeskError::Export(ExportError::NothingToExport) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// Text shown to the user when this error ends an operation
    pub fn user_message(&self) -> String {
        match self {
            EventDeskError::Api(e) => e.to_string(),
            EventDeskError::Export(ExportError::NothingToExport) => ExportError::NothingToExport.to_string(),
            EventDeskError::Export(_) => "Failed to export Excel file".to_string(),
            EventDeskError::Validation(message) => message.clone(),
            EventDeskError::NotAuthenticated => "Please login to continue".to_string(),
            EventDeskError::PermissionDenied(_) => "You are not allowed to view this page".to_string(),
            other => other.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
