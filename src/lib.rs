//! EventDesk
//!
//! Client for a campus event management backend. Admins manage faculty
//! accounts, faculty approve events, coordinators create events and export
//! their participants, and students browse and register for events. This
//! library provides the session store, the authenticated API client, the
//! role guard, notifications, the participant export and the page
//! controllers built on them.

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod state;
pub mod utils;
pub mod middleware;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{EventDeskError, ApiError, ExportError, Result};

// Re-export main components for easy access
pub use services::ServiceFactory;
pub use state::{SessionHandle, SessionState, SessionStorage};
pub use middleware::{RoleGuard, RouteDecision};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
