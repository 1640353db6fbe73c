//! Authenticated backend client
//!
//! This service wraps every outbound call to the event backend: it attaches
//! the current session token, decodes success payloads into typed results and
//! normalizes failures into [`ApiError`]. No call is retried here; callers
//! decide what to do with a failure.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn, Instrument};
use url::Url;

use crate::config::settings::Settings;
use crate::middleware::logging::RequestLogger;
use crate::state::SessionHandle;
use crate::utils::errors::{ApiError, ApiResult, EventDeskError, Result};

/// Error body shape the backend uses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client bound to the backend base URL and the session
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    session: SessionHandle,
    logger: RequestLogger,
}

impl ApiClient {
    /// Create a new ApiClient instance
    pub fn new(settings: &Settings, session: SessionHandle) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.request_timeout())
            .user_agent(settings.api.user_agent.clone())
            .build()
            .map_err(EventDeskError::Http)?;

        // A trailing slash makes `Url::join` append instead of replacing the last segment
        let mut base = settings.api.base_url.trim_end_matches('/').to_string();
        base.push('/');
        let base_url = Url::parse(&base)?;

        Ok(Self {
            client,
            base_url,
            session,
            logger: RequestLogger::new(settings.api.log_requests),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.execute(Method::GET, path, None::<&()>).await
    }

    /// GET with an explicit token instead of the session's (used to verify a
    /// saved token before it is published)
    pub async fn get_with_token<T: DeserializeOwned>(&self, path: &str, token: &str) -> ApiResult<T> {
        self.send(Method::GET, path, None::<&()>, Some(token.to_string())).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.execute(Method::POST, path, Some(body)).await
    }

    /// POST without attaching the session token (login, registration)
    pub async fn post_public<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.send(Method::POST, path, Some(body), None).await
    }

    /// POST without a request body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.execute(Method::POST, path, None::<&()>).await
    }

    /// PUT without a request body
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.execute(Method::PUT, path, None::<&()>).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.execute(Method::DELETE, path, None::<&()>).await
    }

    fn url(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidResponse(format!("invalid request path {}: {}", path, e)))
    }

    async fn execute<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        self.send(method, path, body, self.session.token()).await
    }

    async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: Option<String>,
    ) -> ApiResult<T> {
        let url = self.url(path)?;

        let mut request: RequestBuilder = self.client.request(method.clone(), url);
        if let Some(token) = &token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let tracker = self.logger.start(method.as_str(), path);
        let result = self.dispatch(request).instrument(tracker.span()).await;
        tracker.finish(result.as_ref().map(|(status, _)| *status));

        let (_, payload) = match result {
            Ok(ok) => ok,
            Err(err) => {
                if err.is_unauthorized() {
                    if let Some(token) = &token {
                        self.drop_rejected_token(token).await;
                    }
                }
                return Err(err);
            }
        };

        decode(&payload)
    }

    async fn dispatch(&self, request: RequestBuilder) -> ApiResult<(u16, String)> {
        let response: Response = request.send().await.map_err(|e| ApiError::NoResponse {
            reason: e.to_string(),
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            if status.is_success() {
                ApiError::InvalidResponse(e.to_string())
            } else {
                ApiError::Server { status_code: status.as_u16(), message: None }
            }
        })?;

        if status.is_success() {
            Ok((status.as_u16(), text))
        } else {
            Err(normalize_failure(status.as_u16(), &text))
        }
    }

    async fn drop_rejected_token(&self, token: &str) {
        match self.session.invalidate_token(token).await {
            Ok(true) => warn!("Backend rejected the session token; session cleared"),
            Ok(false) => debug!("Rejected token is no longer the active session"),
            Err(e) => warn!(error = %e, "Failed to clear rejected session"),
        }
    }
}

/// Build the normalized error for a failure response
fn normalize_failure(status_code: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty());

    ApiError::Server { status_code, message }
}

/// Decode a success payload; an empty body decodes as JSON `null`
fn decode<T: DeserializeOwned>(payload: &str) -> ApiResult<T> {
    let payload = if payload.trim().is_empty() { "null" } else { payload };
    serde_json::from_str(payload).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}
