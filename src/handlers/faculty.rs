//! Faculty dashboard: approving coordinators' events

use crate::models::{Event, EventStatus, MessageResponse, Role};
use crate::services::ServiceFactory;
use crate::utils::errors::{EventDeskError, Result};
use crate::utils::logging::log_user_action;

use super::{authorize, report, report_load};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Approve,
    Reject,
}

impl Decision {
    fn segment(self) -> &'static str {
        match self {
            Decision::Approve => "approve",
            Decision::Reject => "reject",
        }
    }
}

/// Events awaiting a faculty decision
pub struct EventApprovalsPage<'a> {
    services: &'a ServiceFactory,
    pub events: Vec<Event>,
}

impl<'a> EventApprovalsPage<'a> {
    pub fn new(services: &'a ServiceFactory) -> Self {
        Self {
            services,
            events: Vec::new(),
        }
    }

    /// Load events and keep the pending ones
    pub async fn load(&mut self) -> Result<()> {
        authorize(self.services, Role::Faculty)?;

        match self.services.api.get::<Vec<Event>>("/faculty/events").await {
            Ok(events) => {
                self.events = events
                    .into_iter()
                    .filter(|event| event.status == EventStatus::Pending)
                    .collect();
                Ok(())
            }
            Err(e) => {
                let e = EventDeskError::from(e);
                report_load(self.services, "pending events", &e);
                Err(e)
            }
        }
    }

    pub async fn approve(&mut self, event_id: &str) -> Result<()> {
        self.decide(event_id, Decision::Approve).await
    }

    pub async fn reject(&mut self, event_id: &str) -> Result<()> {
        self.decide(event_id, Decision::Reject).await
    }

    async fn decide(&mut self, event_id: &str, decision: Decision) -> Result<()> {
        let faculty = authorize(self.services, Role::Faculty)?;

        let path = format!(
            "/faculty/event/{}/{}",
            urlencoding::encode(event_id),
            decision.segment()
        );
        let (done, failed) = match decision {
            Decision::Approve => ("Event approved successfully! ✅", "Failed to approve event"),
            Decision::Reject => ("Event rejected", "Failed to reject event"),
        };

        let response = match self.services.api.put_empty::<Option<MessageResponse>>(&path).await {
            Ok(response) => response,
            Err(e) => {
                let e = EventDeskError::from(e);
                report(self.services, &e, failed);
                return Err(e);
            }
        };

        log_user_action(&faculty.id, decision.segment(), Some(event_id));
        self.services
            .notifications
            .success(response.and_then(|r| r.message).unwrap_or_else(|| done.to_string()));
        let _ = self.load().await;
        Ok(())
    }
}
