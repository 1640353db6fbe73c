//! Data models module
//!
//! This module contains all data structures exchanged with the backend

pub mod user;
pub mod event;
pub mod participant;
pub mod club;
pub mod faculty;

// Re-export commonly used models
pub use user::{Role, Identity, LoginRequest, LoginResponse, RegisterStudentRequest, MessageResponse};
pub use event::{Event, EventStatus, EventDetails, CreateEventRequest};
pub use participant::{Participant, ParticipantsResponse};
pub use club::{Club, ClubRef};
pub use faculty::{Faculty, RegisterFacultyRequest};
