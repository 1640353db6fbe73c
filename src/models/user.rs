//! User model

use serde::{Deserialize, Serialize};

/// Role declared by the backend for an authenticated user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Faculty,
    Coordinator,
    Student,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Faculty, Role::Coordinator, Role::Student];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Faculty => "faculty",
            Role::Coordinator => "coordinator",
            Role::Student => "student",
        }
    }

    /// Root path of the role's dashboard subtree
    pub fn root(&self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Faculty => "/faculty",
            Role::Coordinator => "/coordinator",
            Role::Student => "/student",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated user profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Identity,
}

/// Self-service student registration form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterStudentRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub department: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Body of backend replies that only carry a status message
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}
