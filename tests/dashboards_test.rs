//! Admin, faculty, coordinator and student dashboard actions

mod helpers;

use assert_matches::assert_matches;
use eventdesk::handlers::{
    ClubsPage, CoordinatorEventsPage, CreateEventPage, EventApprovalsPage, FacultyListPage, RegisterFacultyPage,
    StudentEventsPage, StudentMyEventsPage,
};
use eventdesk::models::{CreateEventRequest, RegisterFacultyRequest, Role};
use eventdesk::services::NotificationKind;
use eventdesk::EventDeskError;
use helpers::*;
use serde_json::json;

fn faculty_form() -> RegisterFacultyRequest {
    RegisterFacultyRequest {
        name: "Dr. Mehta".to_string(),
        email: "mehta@campus.edu".to_string(),
        contact_no: "9876543210".to_string(),
        password: TEST_PASSWORD.to_string(),
        photo: None,
    }
}

fn event_form() -> CreateEventRequest {
    CreateEventRequest {
        name: "Tech Fest".to_string(),
        description: "Annual fest".to_string(),
        date: "2024-03-05".to_string(),
        time: "10:00".to_string(),
        venue: "Main Hall".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_admin_registers_faculty() {
    let ctx = TestContext::new().await;
    ctx.sign_in_as(Role::Admin).await;
    ctx.backend.mock_json("POST", "/admin/register-faculty", 201, json!({})).await;

    let mut page = RegisterFacultyPage::new(&ctx.services);
    page.form = faculty_form();
    page.submit().await.unwrap();

    assert!(page.form.name.is_empty());
    assert_eq!(
        ctx.last_notification(),
        Some((NotificationKind::Success, "Faculty registered successfully! ✅".to_string()))
    );

    let requests = ctx.backend.requests_to("/admin/register-faculty").await;
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["contactNo"], "9876543210");
    assert_eq!(
        requests[0].headers.get("authorization").and_then(|v| v.to_str().ok()),
        Some("Bearer token-admin")
    );
}

#[tokio::test]
async fn test_admin_register_faculty_failure_keeps_form() {
    let ctx = TestContext::new().await;
    ctx.sign_in_as(Role::Admin).await;
    ctx.backend
        .mock_json("POST", "/admin/register-faculty", 400, json!({ "message": "Faculty already exists" }))
        .await;

    let mut page = RegisterFacultyPage::new(&ctx.services);
    page.form = faculty_form();
    assert!(page.submit().await.is_err());

    assert_eq!(page.form.name, "Dr. Mehta");
    assert_eq!(
        ctx.last_notification(),
        Some((NotificationKind::Error, "Faculty already exists".to_string()))
    );
}

#[tokio::test]
async fn test_admin_register_faculty_requires_fields() {
    let ctx = TestContext::new().await;
    ctx.sign_in_as(Role::Admin).await;
    ctx.backend.forbid("POST", "/admin/register-faculty").await;

    let mut page = RegisterFacultyPage::new(&ctx.services);
    page.form = RegisterFacultyRequest {
        contact_no: String::new(),
        ..faculty_form()
    };

    assert_matches!(page.submit().await, Err(EventDeskError::Validation(_)));
    assert_eq!(
        ctx.last_notification(),
        Some((NotificationKind::Warning, "Please fill in all required fields".to_string()))
    );
}

#[tokio::test]
async fn test_admin_deletes_faculty_and_reloads() {
    let ctx = TestContext::new().await;
    ctx.sign_in_as(Role::Admin).await;
    ctx.backend
        .mock_json("DELETE", "/admin/faculty/f1", 200, json!({ "message": "deleted" }))
        .await;
    ctx.backend
        .mock_json(
            "GET",
            "/admin/faculties",
            200,
            json!([{ "_id": "f2", "name": "Dr. Rao", "email": "rao@campus.edu", "contactNo": "123" }]),
        )
        .await;

    let mut page = FacultyListPage::new(&ctx.services);
    page.delete("f1").await.unwrap();

    assert_eq!(page.faculties.len(), 1);
    assert_eq!(page.faculties[0].id, "f2");
    assert_eq!(
        ctx.last_notification(),
        Some((NotificationKind::Success, "Faculty deleted successfully".to_string()))
    );
}

#[tokio::test]
async fn test_admin_delete_failure_hides_backend_reason() {
    let ctx = TestContext::new().await;
    ctx.sign_in_as(Role::Admin).await;
    ctx.backend
        .mock_json("DELETE", "/admin/faculty/f1", 404, json!({ "message": "No such faculty" }))
        .await;

    assert!(FacultyListPage::new(&ctx.services).delete("f1").await.is_err());
    assert_eq!(
        ctx.last_notification(),
        Some((NotificationKind::Error, "Failed to delete faculty".to_string()))
    );
}

#[tokio::test]
async fn test_faculty_approves_pending_event() {
    let ctx = TestContext::new().await;
    ctx.sign_in_as(Role::Faculty).await;
    ctx.backend
        .mock_json(
            "GET",
            "/faculty/events",
            200,
            json!([event_json("e1", "Tech Fest", "pending"), event_json("e2", "Quiz", "approved")]),
        )
        .await;
    ctx.backend.mock_empty("PUT", "/faculty/event/e1/approve", 200).await;

    let mut page = EventApprovalsPage::new(&ctx.services);
    page.load().await.unwrap();
    assert_eq!(page.events.len(), 1);

    page.approve("e1").await.unwrap();
    assert_eq!(ctx.backend.requests_to("/faculty/event/e1/approve").await.len(), 1);
    assert_eq!(
        ctx.last_notification(),
        Some((NotificationKind::Success, "Event approved successfully! ✅".to_string()))
    );
}

#[tokio::test]
async fn test_faculty_reject_failure() {
    let ctx = TestContext::new().await;
    ctx.sign_in_as(Role::Faculty).await;
    ctx.backend.mock_empty("PUT", "/faculty/event/e1/reject", 500).await;

    assert!(EventApprovalsPage::new(&ctx.services).reject("e1").await.is_err());
    assert_eq!(
        ctx.last_notification(),
        Some((NotificationKind::Error, "Failed to reject event".to_string()))
    );
}

#[tokio::test]
async fn test_coordinator_create_event_validation() {
    let ctx = TestContext::new().await;
    ctx.sign_in_as(Role::Coordinator).await;
    ctx.backend.forbid("POST", "/coordinator/create-event").await;

    let mut page = CreateEventPage::new(&ctx.services);
    page.form = CreateEventRequest {
        venue: "   ".to_string(),
        ..event_form()
    };

    assert_matches!(page.submit().await, Err(EventDeskError::Validation(_)));
    assert_eq!(
        ctx.notifications(),
        vec![(NotificationKind::Warning, "Please fill in all required fields".to_string())]
    );
}

#[tokio::test]
async fn test_coordinator_creates_event() {
    let ctx = TestContext::new().await;
    ctx.sign_in_as(Role::Coordinator).await;
    ctx.backend
        .mock_json("POST", "/coordinator/create-event", 201, json!({ "message": "Event submitted" }))
        .await;

    let mut page = CreateEventPage::new(&ctx.services);
    page.form = event_form();
    page.submit().await.unwrap();

    assert!(page.form.name.is_empty());
    assert_eq!(
        ctx.last_notification(),
        Some((NotificationKind::Success, "Event submitted".to_string()))
    );

    let requests = ctx.backend.requests_to("/coordinator/create-event").await;
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["contactEmail"], "");
    assert!(body.get("image").is_none());
}

#[tokio::test]
async fn test_coordinator_create_event_failure_fallback() {
    let ctx = TestContext::new().await;
    ctx.sign_in_as(Role::Coordinator).await;
    ctx.backend.mock_empty("POST", "/coordinator/create-event", 400).await;

    let mut page = CreateEventPage::new(&ctx.services);
    page.form = event_form();
    assert!(page.submit().await.is_err());
    assert_eq!(
        ctx.last_notification(),
        Some((NotificationKind::Error, "Failed to create event".to_string()))
    );
}

#[tokio::test]
async fn test_coordinator_lists_all_own_events() {
    let ctx = TestContext::new().await;
    ctx.sign_in_as(Role::Coordinator).await;
    ctx.backend
        .mock_json(
            "GET",
            "/coordinator/events",
            200,
            json!([event_json("e1", "Tech Fest", "approved"), event_json("e2", "Quiz", "pending")]),
        )
        .await;

    let mut page = CoordinatorEventsPage::new(&ctx.services);
    page.load().await.unwrap();
    assert_eq!(page.events.len(), 2);
}

#[tokio::test]
async fn test_student_events_and_registrations_load_together() {
    let ctx = TestContext::new().await;
    ctx.sign_in_as(Role::Student).await;
    ctx.backend
        .mock_json(
            "GET",
            "/student/events",
            200,
            json!([event_json("e1", "Tech Fest", "approved"), event_json("e2", "Quiz", "approved")]),
        )
        .await;
    ctx.backend
        .mock_json("GET", "/student/my-events", 200, json!([event_json("e2", "Quiz", "approved")]))
        .await;

    let mut page = StudentEventsPage::new(&ctx.services);
    page.load().await.unwrap();

    assert_eq!(page.events.len(), 2);
    assert!(!page.is_registered("e1"));
    assert!(page.is_registered("e2"));
    assert!(ctx.notifications().is_empty());
}

#[tokio::test]
async fn test_student_registrations_failure_leaves_events_intact() {
    let ctx = TestContext::new().await;
    ctx.sign_in_as(Role::Student).await;
    ctx.backend
        .mock_json("GET", "/student/events", 200, json!([event_json("e1", "Tech Fest", "approved")]))
        .await;
    ctx.backend
        .mock_json("GET", "/student/my-events", 500, json!({ "message": "registrations unavailable" }))
        .await;

    let mut page = StudentEventsPage::new(&ctx.services);
    assert!(page.load().await.is_err());

    assert_eq!(page.events.len(), 1);
    assert!(!page.is_registered("e1"));
    assert_eq!(
        ctx.notifications(),
        vec![(NotificationKind::Error, "registrations unavailable".to_string())]
    );
}

#[tokio::test]
async fn test_student_events_load_fails_when_both_lists_fail() {
    let ctx = TestContext::new().await;
    ctx.sign_in_as(Role::Student).await;
    ctx.backend.mock_empty("GET", "/student/events", 500).await;
    ctx.backend.mock_empty("GET", "/student/my-events", 500).await;

    let mut page = StudentEventsPage::new(&ctx.services);
    assert!(page.load().await.is_err());

    assert!(page.events.is_empty());
    assert_eq!(
        ctx.notifications(),
        vec![
            (NotificationKind::Error, "Server error: 500".to_string()),
            (NotificationKind::Error, "Server error: 500".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_student_registers_for_event() {
    let ctx = TestContext::new().await;
    ctx.sign_in_as(Role::Student).await;
    ctx.backend.mock_json("POST", "/student/register-event/e1", 200, json!({})).await;
    ctx.backend
        .mock_json("GET", "/student/events", 200, json!([event_json("e1", "Tech Fest", "approved")]))
        .await;
    ctx.backend
        .mock_json("GET", "/student/my-events", 200, json!([event_json("e1", "Tech Fest", "approved")]))
        .await;

    let mut page = StudentEventsPage::new(&ctx.services);
    page.register("e1").await.unwrap();

    assert!(page.is_registered("e1"));
    assert_eq!(
        ctx.last_notification(),
        Some((NotificationKind::Success, "Successfully registered for event! 🎉".to_string()))
    );
}

#[tokio::test]
async fn test_student_register_twice_shows_backend_message() {
    let ctx = TestContext::new().await;
    ctx.sign_in_as(Role::Student).await;
    ctx.backend
        .mock_json("POST", "/student/register-event/e1", 400, json!({ "message": "Already registered" }))
        .await;

    assert!(StudentEventsPage::new(&ctx.services).register("e1").await.is_err());
    assert_eq!(
        ctx.last_notification(),
        Some((NotificationKind::Error, "Already registered".to_string()))
    );
}

#[tokio::test]
async fn test_student_my_events_and_clubs() {
    let ctx = TestContext::new().await;
    ctx.sign_in_as(Role::Student).await;
    ctx.backend
        .mock_json("GET", "/student/my-events", 200, json!([event_json("e1", "Tech Fest", "approved")]))
        .await;
    ctx.backend
        .mock_json(
            "GET",
            "/student/clubs",
            200,
            json!([{ "_id": "club1", "name": "Coding Club", "description": "We code" }]),
        )
        .await;

    let mut my_events = StudentMyEventsPage::new(&ctx.services);
    my_events.load().await.unwrap();
    assert_eq!(my_events.events[0].club.as_ref().and_then(|c| c.name.as_deref()), Some("Coding Club"));

    let mut clubs = ClubsPage::new(&ctx.services);
    clubs.load().await.unwrap();
    assert_eq!(clubs.clubs[0].name, "Coding Club");
}
