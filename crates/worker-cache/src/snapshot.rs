//! Stored response snapshots.

use std::time::Duration;

use chrono::{DateTime, Utc};
use http::header::{HeaderName, HeaderValue};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use worker_core::Response;

/// An immutable capture of a response at the moment it was cached.
///
/// The capture timestamp comes from the response's `date` header. A snapshot
/// without one is never considered fresh, so a missing or unparsable header
/// always forces a revalidation attempt instead of pinning the entry fresh
/// forever.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// HTTP status code.
    pub status: u16,
    /// Response headers as ordered name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Response body bytes.
    pub body: Vec<u8>,
    /// When the response was produced, per its `date` header.
    pub captured_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// Capture a response into a snapshot.
    pub fn capture(response: &Response) -> Self {
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        Self {
            status: response.status().as_u16(),
            headers,
            body: response.body().to_vec(),
            captured_at: response.header("date").and_then(parse_http_date),
        }
    }

    /// Rebuild a servable response from this snapshot.
    ///
    /// A corrupt stored status rebuilds as 500 so bad persisted data can
    /// never masquerade as a success.
    pub fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = Response::new(status).with_body(self.body);

        for (name, value) in &self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                response = response.with_header(name, value);
            }
        }

        response
    }

    /// Age of the snapshot relative to `now`, if a capture timestamp exists.
    pub fn age(&self, now: DateTime<Utc>) -> Option<chrono::Duration> {
        self.captured_at.map(|t| now.signed_duration_since(t))
    }

    /// Whether the snapshot is directly servable without revalidation.
    pub fn is_fresh(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        let Some(age) = self.age(now) else {
            return false;
        };
        match chrono::Duration::from_std(max_age) {
            Ok(max_age) => age < max_age,
            Err(_) => false,
        }
    }
}

fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::DATE;

    fn response_dated(date: DateTime<Utc>) -> Response {
        Response::new(StatusCode::OK)
            .with_header(DATE, HeaderValue::from_str(&date.to_rfc2822()).unwrap())
            .with_body(b"shell".to_vec())
    }

    #[test]
    fn test_capture_parses_date_header() {
        let now = Utc::now();
        let snapshot = Snapshot::capture(&response_dated(now));

        assert_eq!(snapshot.status, 200);
        assert!(snapshot.captured_at.is_some());
        // RFC 2822 has whole-second resolution.
        let age = snapshot.age(now).unwrap();
        assert!(age.num_seconds().abs() <= 1);
    }

    #[test]
    fn test_capture_without_date_header() {
        let snapshot = Snapshot::capture(&Response::new(StatusCode::OK));

        assert!(snapshot.captured_at.is_none());
        assert!(!snapshot.is_fresh(Utc::now(), Duration::from_secs(86_400)));
    }

    #[test]
    fn test_capture_with_garbage_date_header() {
        let response = Response::new(StatusCode::OK)
            .with_header(DATE, HeaderValue::from_static("not a date"));
        let snapshot = Snapshot::capture(&response);

        assert!(snapshot.captured_at.is_none());
        assert!(!snapshot.is_fresh(Utc::now(), Duration::from_secs(86_400)));
    }

    #[test]
    fn test_freshness_boundary() {
        let now = Utc::now();
        let max_age = Duration::from_secs(86_400);

        let recent = Snapshot::capture(&response_dated(now - chrono::Duration::hours(23)));
        assert!(recent.is_fresh(now, max_age));

        let stale = Snapshot::capture(&response_dated(now - chrono::Duration::hours(25)));
        assert!(!stale.is_fresh(now, max_age));
    }

    #[test]
    fn test_into_response_round_trip() {
        let original = Response::new(StatusCode::CREATED)
            .with_header(
                http::header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            )
            .with_body(br#"{"ok":true}"#.to_vec());

        let rebuilt = Snapshot::capture(&original).into_response();

        assert_eq!(rebuilt.status(), StatusCode::CREATED);
        assert_eq!(rebuilt.header("content-type"), Some("application/json"));
        assert_eq!(rebuilt.body(), original.body());
    }

    #[test]
    fn test_corrupt_status_rebuilds_as_server_error() {
        let mut snapshot = Snapshot::capture(&Response::new(StatusCode::OK));
        snapshot.status = 9999;

        let rebuilt = snapshot.into_response();
        assert_eq!(rebuilt.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_snapshot_serializes() {
        let snapshot = Snapshot::capture(&response_dated(Utc::now()));
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(back.status, snapshot.status);
        assert_eq!(back.captured_at, snapshot.captured_at);
        assert_eq!(back.body, snapshot.body);
    }
}
