//! Mock event backend for testing
//!
//! This module provides a mock HTTP server that simulates the event backend
//! REST API. It uses wiremock to create configurable mock responses.

use serde_json::{json, Value};
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, Request, ResponseTemplate,
};

/// Mock backend server for testing
pub struct BackendMockServer {
    pub server: MockServer,
}

impl BackendMockServer {
    /// Create a new mock backend server
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL the API client should be configured with
    pub fn base_url(&self) -> String {
        format!("{}/api", self.server.uri())
    }

    /// Respond to `verb /api{route}` with `status` and a JSON body
    pub async fn mock_json(&self, verb: &str, route: &str, status: u16, body: Value) {
        Mock::given(method(verb))
            .and(path(format!("/api{}", route)))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Respond with an empty body
    pub async fn mock_empty(&self, verb: &str, route: &str, status: u16) {
        Mock::given(method(verb))
            .and(path(format!("/api{}", route)))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Fail the test if `verb /api{route}` is ever called
    pub async fn forbid(&self, verb: &str, route: &str) {
        Mock::given(method(verb))
            .and(path(format!("/api{}", route)))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    /// Setup a successful login for the given credentials
    pub async fn mock_login(&self, email: &str, password: &str, token: &str, user: Value) {
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({ "email": email, "password": password })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": token, "user": user })))
            .mount(&self.server)
            .await;
    }

    /// Setup `/auth/me` answering only for the given bearer token
    pub async fn mock_me(&self, token: &str, user: Value) {
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .and(header("authorization", format!("Bearer {}", token).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(user))
            .mount(&self.server)
            .await;
    }

    /// Requests received so far for `route`
    pub async fn requests_to(&self, route: &str) -> Vec<Request> {
        let wanted = format!("/api{}", route);
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.url.path() == wanted)
            .collect()
    }
}

/// Base URL of a port nothing listens on
pub async fn unreachable_base_url() -> String {
    // Pooled mock servers keep listening after drop, so reserve and release a raw port
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().expect("No local address").port();
    drop(listener);
    format!("http://127.0.0.1:{}/api", port)
}
