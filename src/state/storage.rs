//! Session persistence
//!
//! This module keeps the session token (and the identity it was issued for)
//! across process restarts, including serialization, atomic replacement
//! and cleanup.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::Identity;
use crate::utils::errors::Result;

/// On-disk shape of a saved session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub token: String,
    #[serde(default)]
    pub user: Option<Identity>,
}

#[derive(Debug, Clone)]
enum Backend {
    File(PathBuf),
    Memory(Arc<Mutex<Option<PersistedSession>>>),
}

/// Storage for the persisted session
#[derive(Debug, Clone)]
pub struct SessionStorage {
    backend: Backend,
}

impl SessionStorage {
    /// Store the session as JSON at `path`
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self { backend: Backend::File(path.into()) }
    }

    /// Keep the session in memory only (tests, throwaway sessions)
    pub fn memory() -> Self {
        Self { backend: Backend::Memory(Arc::new(Mutex::new(None))) }
    }

    /// Load the saved session, if any
    pub async fn load(&self) -> Result<Option<PersistedSession>> {
        match &self.backend {
            Backend::File(path) => {
                let data = match tokio::fs::read_to_string(path).await {
                    Ok(data) => data,
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                        debug!(path = %path.display(), "No saved session");
                        return Ok(None);
                    }
                    Err(e) => return Err(e.into()),
                };

                let session: PersistedSession = serde_json::from_str(&data)?;
                debug!(path = %path.display(), has_identity = session.user.is_some(), "Saved session loaded");
                Ok(Some(session))
            }
            Backend::Memory(slot) => Ok(lock(slot).clone()),
        }
    }

    /// Replace the saved session.
    ///
    /// File writes go to a sibling temp file that is renamed over the target,
    /// so a failed save never leaves a truncated session behind.
    pub async fn save(&self, session: &PersistedSession) -> Result<()> {
        match &self.backend {
            Backend::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await?;
                }

                let serialized = serde_json::to_string_pretty(session)?;
                let tmp_path = path.with_extension("json.tmp");
                tokio::fs::write(&tmp_path, serialized).await?;
                if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
                    let _ = tokio::fs::remove_file(&tmp_path).await;
                    return Err(e.into());
                }

                debug!(path = %path.display(), "Session saved");
                Ok(())
            }
            Backend::Memory(slot) => {
                *lock(slot) = Some(session.clone());
                Ok(())
            }
        }
    }

    /// Remove the saved session; succeeds when nothing was saved
    pub async fn clear(&self) -> Result<()> {
        match &self.backend {
            Backend::File(path) => match tokio::fs::remove_file(path).await {
                Ok(()) => {
                    debug!(path = %path.display(), "Saved session removed");
                    Ok(())
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to remove saved session");
                    Err(e.into())
                }
            },
            Backend::Memory(slot) => {
                *lock(slot) = None;
                Ok(())
            }
        }
    }
}

fn lock(slot: &Mutex<Option<PersistedSession>>) -> std::sync::MutexGuard<'_, Option<PersistedSession>> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
