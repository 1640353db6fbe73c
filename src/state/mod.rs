//! State management module
//!
//! This module holds the session state shared by every service and its
//! persisted copy

pub mod session;
pub mod storage;

// Re-export commonly used state components
pub use session::{SessionHandle, SessionState};
pub use storage::{PersistedSession, SessionStorage};
