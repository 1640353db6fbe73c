//! Participant model

use serde::{Deserialize, Serialize};

use super::event::EventDetails;

/// One registrant of an event, as returned by the coordinator endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub student_id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub contact_no: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParticipantsResponse {
    #[serde(default)]
    pub participants: Option<Vec<Participant>>,
    #[serde(default)]
    pub event: Option<EventDetails>,
}
