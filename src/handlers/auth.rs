//! Login, student self-registration and logout

use crate::middleware::{RoleGuard, LOGIN_PATH};
use crate::models::RegisterStudentRequest;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use crate::utils::logging::log_user_action;

use super::report;

pub struct LoginPage<'a> {
    services: &'a ServiceFactory,
}

impl<'a> LoginPage<'a> {
    pub fn new(services: &'a ServiceFactory) -> Self {
        Self { services }
    }

    /// Submit credentials. On success returns the path of the role's dashboard.
    pub async fn submit(&self, email: &str, password: &str) -> Result<&'static str> {
        match self.services.session_store.login(email, password).await {
            Ok(identity) => {
                self.services.notifications.success("Login successful! Redirecting...");
                Ok(RoleGuard::landing_path(&identity))
            }
            Err(e) => {
                report(self.services, &e, "Login failed. Please check your credentials.");
                Err(e)
            }
        }
    }
}

pub struct RegisterPage<'a> {
    services: &'a ServiceFactory,
}

impl<'a> RegisterPage<'a> {
    pub fn new(services: &'a ServiceFactory) -> Self {
        Self { services }
    }

    /// Register a student account; on success returns the login path
    pub async fn submit(&self, profile: &RegisterStudentRequest) -> Result<&'static str> {
        match self.services.session_store.register(profile).await {
            Ok(message) => {
                self.services.notifications.success(message);
                Ok(LOGIN_PATH)
            }
            Err(e) => {
                report(self.services, &e, "Registration failed. Please try again.");
                Err(e)
            }
        }
    }
}

/// Clear the session and return where the user lands
pub async fn logout(services: &ServiceFactory) -> &'static str {
    if let Some(identity) = services.session_store.identity() {
        log_user_action(&identity.id, "logout", None);
    }
    services.session_store.logout().await;
    RoleGuard::logout_path()
}
