//! Middleware module
//!
//! This module contains routing guards and request logging

pub mod auth;
pub mod logging;

// Re-export commonly used middleware
pub use auth::{RoleGuard, RouteDecision, Page, NavItem, Navbar, LOGIN_PATH, REGISTER_PATH};
pub use logging::{RequestLogger, RequestTracker};
