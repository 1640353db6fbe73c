//! Student dashboard pages

use std::collections::HashSet;

use crate::models::{Club, Event, MessageResponse, Role};
use crate::services::ServiceFactory;
use crate::utils::errors::{EventDeskError, Result};
use crate::utils::logging::log_user_action;

use super::{authorize, report, report_load};

async fn fetch_events(services: &ServiceFactory) -> Result<Vec<Event>> {
    Ok(services.api.get::<Vec<Event>>("/student/events").await?)
}

async fn fetch_my_events(services: &ServiceFactory) -> Result<Vec<Event>> {
    Ok(services.api.get::<Vec<Event>>("/student/my-events").await?)
}

/// Available events with per-event registration
pub struct StudentEventsPage<'a> {
    services: &'a ServiceFactory,
    pub events: Vec<Event>,
    registered: HashSet<String>,
}

impl<'a> StudentEventsPage<'a> {
    pub fn new(services: &'a ServiceFactory) -> Self {
        Self {
            services,
            events: Vec::new(),
            registered: HashSet::new(),
        }
    }

    /// Fetch available events and the student's registrations concurrently.
    ///
    /// Each result updates its own list; one failing leaves the other intact.
    /// Returns the first failure after both have been applied.
    pub async fn load(&mut self) -> Result<()> {
        authorize(self.services, Role::Student)?;
        self.refresh().await
    }

    async fn refresh(&mut self) -> Result<()> {
        let (events, mine) = futures::join!(fetch_events(self.services), fetch_my_events(self.services));

        let events = match events {
            Ok(events) => {
                self.events = events;
                Ok(())
            }
            Err(e) => {
                report_load(self.services, "events", &e);
                Err(e)
            }
        };
        let mine = match mine {
            Ok(mine) => {
                self.registered = mine.into_iter().map(|event| event.id).collect();
                Ok(())
            }
            Err(e) => {
                report_load(self.services, "registrations", &e);
                Err(e)
            }
        };
        events.and(mine)
    }

    pub fn is_registered(&self, event_id: &str) -> bool {
        self.registered.contains(event_id)
    }

    pub async fn register(&mut self, event_id: &str) -> Result<()> {
        let student = authorize(self.services, Role::Student)?;

        let path = format!("/student/register-event/{}", urlencoding::encode(event_id));
        if let Err(e) = self.services.api.post_empty::<Option<MessageResponse>>(&path).await {
            let e = EventDeskError::from(e);
            report(self.services, &e, "Failed to register for event");
            return Err(e);
        }

        log_user_action(&student.id, "register_event", Some(event_id));
        self.services.notifications.success("Successfully registered for event! 🎉");
        // A failed refresh is already on screen; the registration itself stands
        let _ = self.refresh().await;
        Ok(())
    }
}

/// Events the student registered for
pub struct StudentMyEventsPage<'a> {
    services: &'a ServiceFactory,
    pub events: Vec<Event>,
}

impl<'a> StudentMyEventsPage<'a> {
    pub fn new(services: &'a ServiceFactory) -> Self {
        Self {
            services,
            events: Vec::new(),
        }
    }

    pub async fn load(&mut self) -> Result<()> {
        authorize(self.services, Role::Student)?;

        match fetch_my_events(self.services).await {
            Ok(events) => {
                self.events = events;
                Ok(())
            }
            Err(e) => {
                report_load(self.services, "registrations", &e);
                Err(e)
            }
        }
    }
}

pub struct ClubsPage<'a> {
    services: &'a ServiceFactory,
    pub clubs: Vec<Club>,
}

impl<'a> ClubsPage<'a> {
    pub fn new(services: &'a ServiceFactory) -> Self {
        Self {
            services,
            clubs: Vec::new(),
        }
    }

    pub async fn load(&mut self) -> Result<()> {
        authorize(self.services, Role::Student)?;

        match self.services.api.get::<Vec<Club>>("/student/clubs").await {
            Ok(clubs) => {
                self.clubs = clubs;
                Ok(())
            }
            Err(e) => {
                let e = EventDeskError::from(e);
                report_load(self.services, "clubs", &e);
                Err(e)
            }
        }
    }
}
