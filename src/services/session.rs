//! Session store
//!
//! This service owns the authentication lifecycle: restoring a saved session
//! on start-up, logging in, registering students and logging out. State
//! changes are published through the shared [`SessionHandle`].

use tracing::{debug, info, warn};

use crate::config::settings::Settings;
use crate::models::{Identity, LoginRequest, LoginResponse, MessageResponse, RegisterStudentRequest};
use crate::services::api::ApiClient;
use crate::state::{SessionHandle, SessionState};
use crate::utils::errors::{EventDeskError, Result};
use crate::utils::helpers::is_filled;
use crate::utils::logging::log_auth_event;

const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/register";
const ME_PATH: &str = "/auth/me";

/// Session store for the current user
#[derive(Clone, Debug)]
pub struct SessionStore {
    api: ApiClient,
    session: SessionHandle,
    verify_on_restore: bool,
}

impl SessionStore {
    /// Create a new SessionStore instance
    pub fn new(api: ApiClient, settings: &Settings) -> Self {
        let session = api.session().clone();
        Self {
            api,
            session,
            verify_on_restore: settings.session.verify_on_restore,
        }
    }

    pub fn handle(&self) -> &SessionHandle {
        &self.session
    }

    pub fn current(&self) -> SessionState {
        self.session.current()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.session.identity()
    }

    /// Restore a saved session.
    ///
    /// Any failure along the way clears the saved data and leaves the store
    /// anonymous; a stale identity is never published.
    pub async fn restore(&self) -> SessionState {
        let saved = match self.session.storage().load().await {
            Ok(Some(saved)) => saved,
            Ok(None) => {
                debug!("No saved session to restore");
                return SessionState::Anonymous;
            }
            Err(e) => {
                warn!(error = %e, "Saved session is unreadable; starting anonymous");
                self.discard().await;
                return SessionState::Anonymous;
            }
        };

        let identity = match saved.user {
            Some(identity) if !self.verify_on_restore => identity,
            _ => {
                match self.api.get_with_token::<Identity>(ME_PATH, &saved.token).await {
                    Ok(identity) => identity,
                    Err(e) => {
                        warn!(error = %e, "Could not restore session identity");
                        self.discard().await;
                        return SessionState::Anonymous;
                    }
                }
            }
        };

        info!(user_id = %identity.id, role = %identity.role, "Session restored");
        self.session.adopt(identity, saved.token);
        self.session.current()
    }

    /// Log in with email and password.
    ///
    /// On failure the previous session, if any, is left exactly as it was.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity> {
        let email = email.trim();
        if !is_filled(email) || !is_filled(password) {
            return Err(EventDeskError::Validation("Email and password are required".to_string()));
        }

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = match self.api.post_public(LOGIN_PATH, &request).await {
            Ok(response) => response,
            Err(e) => {
                log_auth_event(email, "login", false, Some(&e.to_string()));
                return Err(e.into());
            }
        };

        self.session.establish(response.user.clone(), response.token).await?;
        log_auth_event(email, "login", true, Some(response.user.role.as_str()));
        Ok(response.user)
    }

    /// Register a new student account. Does not log in.
    pub async fn register(&self, profile: &RegisterStudentRequest) -> Result<String> {
        let required = [&profile.name, &profile.email, &profile.password, &profile.department];
        if required.iter().any(|field| !is_filled(field)) {
            return Err(EventDeskError::Validation("Please fill in all required fields".to_string()));
        }

        let mut profile = profile.clone();
        profile.image = profile.image.filter(|image| is_filled(image));

        let response: Option<MessageResponse> = match self.api.post_public(REGISTER_PATH, &profile).await {
            Ok(response) => response,
            Err(e) => {
                log_auth_event(&profile.email, "register", false, Some(&e.to_string()));
                return Err(e.into());
            }
        };

        log_auth_event(&profile.email, "register", true, None);
        Ok(response
            .and_then(|r| r.message)
            .unwrap_or_else(|| "Registration successful! Please login.".to_string()))
    }

    /// Log out. Safe to call when already logged out.
    pub async fn logout(&self) {
        if let Some(identity) = self.session.identity() {
            log_auth_event(&identity.email, "logout", true, None);
        }
        self.discard().await;
    }

    async fn discard(&self) {
        if let Err(e) = self.session.clear().await {
            warn!(error = %e, "Failed to remove saved session");
        }
    }
}
