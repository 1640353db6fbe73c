//! Page handlers module
//!
//! Each role dashboard page is a small controller over the shared services.
//! Controllers check the role first and turn every failure into a
//! notification; the returned `Result` only tells the caller whether the
//! action went through.

pub mod admin;
pub mod auth;
pub mod coordinator;
pub mod faculty;
pub mod student;

// Re-export commonly used pages
pub use admin::{FacultyListPage, RegisterFacultyPage};
pub use auth::{logout, LoginPage, RegisterPage};
pub use coordinator::{CoordinatorEventsPage, CreateEventPage, ViewParticipantsPage};
pub use faculty::EventApprovalsPage;
pub use student::{ClubsPage, StudentEventsPage, StudentMyEventsPage};

use tracing::{debug, warn};

use crate::models::{Identity, Role};
use crate::services::ServiceFactory;
use crate::utils::errors::{EventDeskError, Result};
use crate::utils::logging::log_api_error;

pub(crate) const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";

/// Resolve the signed-in identity for a page owned by `role`
pub(crate) fn authorize(services: &ServiceFactory, role: Role) -> Result<Identity> {
    let identity = services.session_store.identity();
    match services.guard.require_role(identity.as_ref(), role) {
        Ok(identity) => Ok(identity.clone()),
        Err(e) => {
            report(services, &e, &e.user_message());
            Err(e)
        }
    }
}

/// Surface a failure as a notification.
///
/// Backend messages win over `fallback`; an unreachable backend gets its own
/// message. Validation problems are warnings.
pub(crate) fn report(services: &ServiceFactory, err: &EventDeskError, fallback: &str) {
    debug!(
        severity = %err.severity(),
        recoverable = err.is_recoverable(),
        error = %err,
        "Reporting failed operation"
    );
    match err {
        EventDeskError::Validation(message) => {
            services.notifications.warning(message.clone());
        }
        EventDeskError::Api(api) if api.is_network() => {
            services.notifications.error(api.to_string());
        }
        EventDeskError::Api(api) => {
            services.notifications.error(api.message_or(fallback));
        }
        EventDeskError::NotAuthenticated | EventDeskError::PermissionDenied(_) => {
            services.notifications.error(err.user_message());
        }
        other => {
            warn!(error = %other, "Operation failed");
            services.notifications.error(fallback);
        }
    }
}

/// Surface a failed list load with the normalized server message
pub(crate) fn report_load(services: &ServiceFactory, what: &str, err: &EventDeskError) {
    let retry = if err.is_recoverable() { "retryable" } else { "not retryable" };
    log_api_error(what, &err.to_string(), Some(retry));
    services.notifications.error(err.user_message());
}
