//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;

fn non_alphanumeric() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^A-Za-z0-9]").expect("static pattern"))
}

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    email.contains('@') && email.contains('.') && email.len() > 5
}

/// True when the form field holds something other than whitespace
pub fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Replace every character outside `[A-Za-z0-9]` with an underscore
pub fn sanitize_file_stem(name: &str) -> String {
    non_alphanumeric().replace_all(name, "_").into_owned()
}

/// Parse a backend date (`YYYY-MM-DD` or RFC 3339 timestamp)
pub fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc().date()))
}

/// Format a backend date for display; unparseable input is returned verbatim
pub fn format_event_date(raw: &str, format: &str) -> String {
    match parse_event_date(raw) {
        Some(date) => date.format(format).to_string(),
        None => raw.to_string(),
    }
}

/// Truncate text to a maximum length with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
