//! Faculty model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub contact_no: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
}

/// Admin form for creating a faculty account
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterFacultyRequest {
    pub name: String,
    pub email: String,
    pub contact_no: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}
