//! Observable session state
//!
//! The identity and its token travel together in one value, so a reader can
//! never observe an authenticated session without its token.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{debug, info};

use crate::models::{Identity, Role};
use crate::utils::errors::Result;
use super::storage::{PersistedSession, SessionStorage};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated { identity: Identity, token: String },
}

impl SessionState {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Authenticated { identity, .. } => Some(identity),
            SessionState::Anonymous => None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            SessionState::Authenticated { token, .. } => Some(token),
            SessionState::Anonymous => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.identity().map(|identity| identity.role)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }
}

/// Shared handle to the current session and its persisted copy.
///
/// Cloning is cheap; all clones observe the same state. Transitions are
/// serialized so the saved copy always matches the published state.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    state: Arc<watch::Sender<SessionState>>,
    storage: SessionStorage,
    transition: Arc<Mutex<()>>,
}

impl SessionHandle {
    pub fn new(storage: SessionStorage) -> Self {
        let (sender, _) = watch::channel(SessionState::Anonymous);
        Self {
            state: Arc::new(sender),
            storage,
            transition: Arc::new(Mutex::new(())),
        }
    }

    pub fn storage(&self) -> &SessionStorage {
        &self.storage
    }

    /// Snapshot of the current state
    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state.borrow().identity().cloned()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token().map(str::to_string)
    }

    /// Receive every subsequent state change
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Persist, then publish, an authenticated session.
    ///
    /// If persisting fails nothing is published and the previous session
    /// stays in place.
    pub async fn establish(&self, identity: Identity, token: String) -> Result<()> {
        let _transition = self.transition.lock().await;
        self.storage
            .save(&PersistedSession {
                token: token.clone(),
                user: Some(identity.clone()),
            })
            .await?;

        info!(user_id = %identity.id, role = %identity.role, "Session established");
        self.publish(SessionState::Authenticated { identity, token });
        Ok(())
    }

    /// Publish a session restored from storage without writing it back
    pub(crate) fn adopt(&self, identity: Identity, token: String) {
        debug!(user_id = %identity.id, role = %identity.role, "Session restored");
        self.publish(SessionState::Authenticated { identity, token });
    }

    /// Drop the session in memory and on disk. Idempotent.
    ///
    /// The in-memory state is cleared even when removing the saved copy fails.
    pub async fn clear(&self) -> Result<()> {
        let _transition = self.transition.lock().await;
        self.clear_locked().await
    }

    async fn clear_locked(&self) -> Result<()> {
        let was_authenticated = self.state.borrow().is_authenticated();
        self.publish(SessionState::Anonymous);
        if was_authenticated {
            info!("Session cleared");
        }
        self.storage.clear().await
    }

    /// Clear the session only if `token` is still the active one.
    ///
    /// Used when the backend rejects a token; a newer login is left alone.
    pub(crate) async fn invalidate_token(&self, token: &str) -> Result<bool> {
        let _transition = self.transition.lock().await;
        let matches = self.state.borrow().token() == Some(token);
        if matches {
            self.clear_locked().await?;
        }
        Ok(matches)
    }

    fn publish(&self, state: SessionState) {
        self.state.send_replace(state);
    }
}
