//! Logging middleware
//!
//! This module tracks backend calls made by the API client: timing,
//! outcome and slow-call detection.

use std::time::{Duration, Instant};

use tracing::{debug, error, warn, Span};

use crate::utils::errors::ApiError;

/// Calls slower than this are reported even when they succeed
const SLOW_CALL_THRESHOLD: Duration = Duration::from_millis(1000);

/// Logging middleware for backend requests
#[derive(Debug, Clone)]
pub struct RequestLogger {
    log_requests: bool,
    slow_call_threshold: Duration,
}

impl RequestLogger {
    pub fn new(log_requests: bool) -> Self {
        Self {
            log_requests,
            slow_call_threshold: SLOW_CALL_THRESHOLD,
        }
    }

    /// Start tracking one request
    pub fn start(&self, method: &str, path: &str) -> RequestTracker {
        let span = if self.log_requests {
            tracing::debug_span!("api_request", method = %method, path = %path)
        } else {
            Span::none()
        };
        RequestTracker {
            enabled: self.log_requests,
            slow_call_threshold: self.slow_call_threshold,
            method: method.to_string(),
            path: path.to_string(),
            start_time: Instant::now(),
            span,
        }
    }
}

impl Default for RequestLogger {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Tracks a single in-flight request
pub struct RequestTracker {
    enabled: bool,
    slow_call_threshold: Duration,
    method: String,
    path: String,
    start_time: Instant,
    span: Span,
}

impl RequestTracker {
    /// Span to run the request future in
    pub fn span(&self) -> Span {
        self.span.clone()
    }

    /// Record the outcome of the request
    pub fn finish(self, outcome: Result<u16, &ApiError>) {
        if !self.enabled {
            return;
        }
        let _entered = self.span.enter();

        let elapsed = self.start_time.elapsed();
        let duration_ms = elapsed.as_millis() as u64;

        match outcome {
            Ok(status) => debug!(
                method = %self.method,
                path = %self.path,
                status = status,
                duration_ms = duration_ms,
                "API call completed"
            ),
            Err(err) if err.is_network() => error!(
                method = %self.method,
                path = %self.path,
                duration_ms = duration_ms,
                error = ?err,
                "API call got no response"
            ),
            Err(err) => warn!(
                method = %self.method,
                path = %self.path,
                status = err.status_code(),
                duration_ms = duration_ms,
                error = %err,
                "API call failed"
            ),
        }

        if elapsed > self.slow_call_threshold {
            warn!(
                method = %self.method,
                path = %self.path,
                duration_ms = duration_ms,
                "Slow API call detected"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_logger_creation() {
        let logger = RequestLogger::default();
        assert!(logger.log_requests);
        assert_eq!(logger.slow_call_threshold, SLOW_CALL_THRESHOLD);
    }

    #[test]
    fn test_tracker_records_all_outcomes() {
        let logger = RequestLogger::new(true);
        logger.start("GET", "/student/events").finish(Ok(200));
        logger
            .start("GET", "/student/events")
            .finish(Err(&ApiError::Server { status_code: 500, message: None }));
        logger
            .start("GET", "/student/events")
            .finish(Err(&ApiError::NoResponse { reason: "refused".to_string() }));
    }

    #[test]
    fn test_disabled_logger_has_no_span() {
        let tracker = RequestLogger::new(false).start("GET", "/student/events");
        assert!(tracker.span().is_none());
        tracker.finish(Ok(200));

        let tracker = RequestLogger::new(true).start("GET", "/student/events");
        assert!(tracker.enabled);
    }
}
