//! Coordinator dashboard pages

use std::path::PathBuf;

use tracing::{debug, info};

use crate::models::{CreateEventRequest, Event, EventDetails, MessageResponse, Participant, ParticipantsResponse, Role};
use crate::services::ServiceFactory;
use crate::utils::errors::{EventDeskError, Result};
use crate::utils::helpers::is_filled;
use crate::utils::logging::log_user_action;

use super::{authorize, report, report_load, REQUIRED_FIELDS_MESSAGE};

/// Event creation form. New events start out pending faculty approval.
pub struct CreateEventPage<'a> {
    services: &'a ServiceFactory,
    pub form: CreateEventRequest,
}

impl<'a> CreateEventPage<'a> {
    pub fn new(services: &'a ServiceFactory) -> Self {
        Self {
            services,
            form: CreateEventRequest::default(),
        }
    }

    pub async fn submit(&mut self) -> Result<()> {
        let coordinator = authorize(self.services, Role::Coordinator)?;

        let form = &self.form;
        let required = [&form.name, &form.description, &form.date, &form.time, &form.venue];
        if required.iter().any(|field| !is_filled(field)) {
            let e = EventDeskError::Validation(REQUIRED_FIELDS_MESSAGE.to_string());
            report(self.services, &e, REQUIRED_FIELDS_MESSAGE);
            return Err(e);
        }

        let mut request = form.clone();
        request.image = request.image.filter(|image| is_filled(image));

        let response: Option<MessageResponse> =
            match self.services.api.post("/coordinator/create-event", &request).await {
                Ok(response) => response,
                Err(e) => {
                    let e = EventDeskError::from(e);
                    report(self.services, &e, "Failed to create event");
                    return Err(e);
                }
            };

        log_user_action(&coordinator.id, "create_event", Some(&request.name));
        self.services.notifications.success(
            response
                .and_then(|r| r.message)
                .unwrap_or_else(|| "Event created successfully! Waiting for faculty approval.".to_string()),
        );
        self.form = CreateEventRequest::default();
        Ok(())
    }
}

async fn fetch_coordinator_events(services: &ServiceFactory) -> Result<Vec<Event>> {
    services
        .api
        .get::<Vec<Event>>("/coordinator/events")
        .await
        .map_err(EventDeskError::from)
}

/// Every event the coordinator created, in any status
pub struct CoordinatorEventsPage<'a> {
    services: &'a ServiceFactory,
    pub events: Vec<Event>,
}

impl<'a> CoordinatorEventsPage<'a> {
    pub fn new(services: &'a ServiceFactory) -> Self {
        Self {
            services,
            events: Vec::new(),
        }
    }

    pub async fn load(&mut self) -> Result<()> {
        authorize(self.services, Role::Coordinator)?;

        match fetch_coordinator_events(self.services).await {
            Ok(events) => {
                self.events = events;
                Ok(())
            }
            Err(e) => {
                report_load(self.services, "coordinator events", &e);
                Err(e)
            }
        }
    }
}

/// Participants of the coordinator's approved events, with spreadsheet export
pub struct ViewParticipantsPage<'a> {
    services: &'a ServiceFactory,
    pub events: Vec<Event>,
    pub selected_event: Option<String>,
    pub event_details: Option<EventDetails>,
    pub participants: Vec<Participant>,
}

impl<'a> ViewParticipantsPage<'a> {
    pub fn new(services: &'a ServiceFactory) -> Self {
        Self {
            services,
            events: Vec::new(),
            selected_event: None,
            event_details: None,
            participants: Vec::new(),
        }
    }

    /// Load the approved events to choose from
    pub async fn load(&mut self) -> Result<()> {
        authorize(self.services, Role::Coordinator)?;

        match fetch_coordinator_events(self.services).await {
            Ok(events) => {
                self.events = events.into_iter().filter(Event::is_approved).collect();
                Ok(())
            }
            Err(e) => {
                self.services.notifications.error("Failed to fetch events");
                Err(e)
            }
        }
    }

    /// Select an event and load its participants.
    ///
    /// On failure the selection is cleared and no participants are shown.
    pub async fn fetch_participants(&mut self, event_id: &str) -> Result<()> {
        authorize(self.services, Role::Coordinator)?;

        let path = format!("/coordinator/event/{}/participants", urlencoding::encode(event_id));
        debug!(event_id = event_id, "Fetching participants");

        match self.services.api.get::<ParticipantsResponse>(&path).await {
            Ok(response) => {
                self.participants = response.participants.unwrap_or_default();
                self.event_details = response.event;
                self.selected_event = Some(event_id.to_string());
                Ok(())
            }
            Err(e) => {
                // The normalized message is shown as is: backend text, status or no-response
                self.services.notifications.error(e.to_string());
                self.participants.clear();
                self.event_details = None;
                self.selected_event = None;
                Err(e.into())
            }
        }
    }

    /// Write the loaded participants to an `.xlsx` file
    pub async fn export_to_excel(&self) -> Result<PathBuf> {
        let coordinator = authorize(self.services, Role::Coordinator)?;

        let details = self.event_details.clone().unwrap_or_default();
        match self.services.exporter.export(&details, &self.participants).await {
            Ok(path) => {
                info!(path = %path.display(), "Participants exported");
                log_user_action(&coordinator.id, "export_participants", self.selected_event.as_deref());
                self.services.notifications.success("Excel file downloaded successfully! 📊");
                Ok(path)
            }
            Err(e) => {
                let e = EventDeskError::from(e);
                self.services.notifications.error(e.user_message());
                Err(e)
            }
        }
    }
}
