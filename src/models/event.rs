//! Event model

use serde::{Deserialize, Serialize};

use super::club::ClubRef;

/// Approval state of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventStatus::Pending => write!(f, "pending"),
            EventStatus::Approved => write!(f, "approved"),
            EventStatus::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default)]
    pub club: Option<ClubRef>,
    #[serde(default)]
    pub registered_students: Vec<serde_json::Value>,
}

impl Event {
    pub fn participant_count(&self) -> usize {
        self.registered_students.len()
    }

    pub fn is_approved(&self) -> bool {
        self.status == EventStatus::Approved
    }
}

/// Event metadata returned alongside a participant list.
///
/// Every field is optional; the export renders missing ones as placeholders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub club: Option<ClubRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub name: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub address: String,
    pub contact_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
