//! Services module
//!
//! This module contains business logic services

pub mod api;
pub mod export;
pub mod notification;
pub mod session;

// Re-export commonly used services
pub use api::ApiClient;
pub use export::{build_participant_sheet, export_filename, Cell, ParticipantExporter, ParticipantSheet};
pub use notification::{Notification, NotificationId, NotificationKind, NotificationService};
pub use session::SessionStore;

use crate::config::settings::Settings;
use crate::middleware::RoleGuard;
use crate::state::{SessionHandle, SessionStorage};
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone, Debug)]
pub struct ServiceFactory {
    pub settings: Settings,
    pub api: ApiClient,
    pub session_store: SessionStore,
    pub notifications: NotificationService,
    pub exporter: ParticipantExporter,
    pub guard: RoleGuard,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services sharing one session
    pub fn new(settings: Settings, storage: SessionStorage) -> Result<Self> {
        let session = SessionHandle::new(storage);
        let api = ApiClient::new(&settings, session)?;
        let session_store = SessionStore::new(api.clone(), &settings);
        let notifications = NotificationService::from_settings(&settings);
        let exporter = ParticipantExporter::new(&settings.export);

        Ok(Self {
            settings,
            api,
            session_store,
            notifications,
            exporter,
            guard: RoleGuard::new(),
        })
    }

    /// Services backed by the session file named in the settings
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let storage = SessionStorage::file(settings.session.storage_path.clone());
        Self::new(settings, storage)
    }

    pub fn session(&self) -> &SessionHandle {
        self.session_store.handle()
    }
}
