//! Test data builders
//!
//! Backend-shaped JSON payloads and matching model values.

use eventdesk::models::{Identity, Role};
use serde_json::{json, Value};

pub const TEST_PASSWORD: &str = "secret123";

pub fn test_identity(role: Role) -> Identity {
    let (id, name) = match role {
        Role::Admin => ("a1", "Admin User"),
        Role::Faculty => ("f1", "Dr. Mehta"),
        Role::Coordinator => ("c1", "Priya Coordinator"),
        Role::Student => ("s1", "Asha Student"),
    };
    Identity {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@campus.edu", role.as_str()),
        role,
    }
}

/// User object as the backend sends it
pub fn user_json(role: Role) -> Value {
    let identity = test_identity(role);
    json!({
        "_id": identity.id,
        "name": identity.name,
        "email": identity.email,
        "role": role.as_str(),
    })
}

pub fn event_json(id: &str, name: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "description": format!("{} description", name),
        "date": "2024-03-05",
        "time": "10:00",
        "venue": "Main Hall",
        "status": status,
        "club": { "_id": "club1", "name": "Coding Club" },
        "registeredStudents": [],
    })
}

pub fn participant_json(student_id: &str, name: &str) -> Value {
    json!({
        "_id": format!("p-{}", student_id),
        "studentId": student_id,
        "name": name,
        "email": format!("{}@campus.edu", name.to_lowercase()),
        "department": "CSE",
        "contactNo": "9876543210",
    })
}

pub fn participants_response(event_name: &str, participants: Vec<Value>) -> Value {
    json!({
        "participants": participants,
        "event": {
            "name": event_name,
            "date": "2024-03-05",
            "time": "10:00",
            "venue": "Main Hall",
            "club": { "name": "Coding Club" },
        },
    })
}
