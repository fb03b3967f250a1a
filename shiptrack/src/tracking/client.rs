//! Tracking lookup trait and HTTP implementation.
//!
//! The [`TrackingLookup`] trait abstracts over the external carrier
//! tracking source so the cache can be driven by mocks in tests. The
//! [`HttpTrackingLookup`] implementation fetches one object per request
//! from a JSON tracking API via `reqwest`.

use std::future::Future;
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use super::config::DEFAULT_LOOKUP_TIMEOUT_SECS;
use super::error::LookupError;
use super::types::TrackingLocation;

/// Display format for event timestamps.
const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Trait for looking up the latest tracking event of a shipment.
///
/// Returns `Ok(None)` when the source knows nothing usable about the code.
/// Latency and availability are untrusted; callers must tolerate errors.
pub trait TrackingLookup: Send + Sync {
    /// Look up the most recent location for `tracking_code`.
    fn lookup(
        &self,
        tracking_code: &str,
    ) -> impl Future<Output = Result<Option<TrackingLocation>, LookupError>> + Send;
}

/// Tracking API response body.
///
/// Events are ordered newest first. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct TrackingResponse {
    #[serde(default)]
    events: Vec<TrackingEvent>,
}

#[derive(Debug, Deserialize)]
struct TrackingEvent {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    unit: Option<EventUnit>,
}

#[derive(Debug, Deserialize)]
struct EventUnit {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    state: Option<String>,
}

/// Lookup client for a JSON tracking API.
///
/// Issues `GET {base_url}/{tracking_code}` with a reusable
/// `reqwest::Client` (connection pooling, per-request timeout). The code is
/// appended as a single percent-encoded path segment.
pub struct HttpTrackingLookup {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpTrackingLookup {
    /// Create a client with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, LookupError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_LOOKUP_TIMEOUT_SECS))
    }

    /// Create a client with a custom per-request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::HttpError(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = base_url.into();
        let base_url = Url::parse(&base_url)
            .map_err(|e| LookupError::HttpError(format!("Invalid tracking API URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(LookupError::HttpError(format!(
                "Tracking API URL cannot take a path: {}",
                base_url
            )));
        }

        Ok(Self { http, base_url })
    }

    fn object_url(&self, tracking_code: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(tracking_code);
        }
        url
    }
}

impl TrackingLookup for HttpTrackingLookup {
    async fn lookup(&self, tracking_code: &str) -> Result<Option<TrackingLocation>, LookupError> {
        let response = self.http.get(self.object_url(tracking_code)).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::trace!(tracking_code, "Tracking code unknown to lookup source");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(LookupError::UnexpectedStatus(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        parse_tracking_response(&bytes)
    }
}

/// Parse a tracking API body into the latest usable location.
///
/// The newest event is used. An event without any city or state cannot be
/// placed on a map and counts as "no usable event".
pub fn parse_tracking_response(body: &[u8]) -> Result<Option<TrackingLocation>, LookupError> {
    let response: TrackingResponse = serde_json::from_slice(body)?;

    let Some(event) = response.events.into_iter().next() else {
        return Ok(None);
    };

    let Some(city_state) = event.unit.as_ref().and_then(format_city_state) else {
        return Ok(None);
    };

    Ok(Some(TrackingLocation {
        city_state,
        description: event.description.trim().to_string(),
        timestamp_text: event.date.as_deref().map(format_timestamp).unwrap_or_default(),
        event_code: event.code.trim().to_string(),
    }))
}

fn format_city_state(unit: &EventUnit) -> Option<String> {
    let city = unit.city.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let state = unit.state.as_deref().map(str::trim).filter(|s| !s.is_empty());

    match (city, state) {
        (Some(city), Some(state)) => Some(format!("{} / {}", city, state)),
        (Some(city), None) => Some(city.to_string()),
        (None, Some(state)) => Some(state.to_string()),
        (None, None) => None,
    }
}

/// Format an RFC 3339 timestamp for display, passing other text through.
fn format_timestamp(raw: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(dt) => dt.format(TIMESTAMP_FORMAT).to_string(),
        Err(_) => raw.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_url_joins_cleanly() {
        let client = HttpTrackingLookup::new("https://api.test/objects/").unwrap();
        assert_eq!(client.object_url("OBJ001").as_str(), "https://api.test/objects/OBJ001");

        let client = HttpTrackingLookup::new("https://api.test/v1/objects").unwrap();
        assert_eq!(client.object_url("OBJ001").as_str(), "https://api.test/v1/objects/OBJ001");
    }

    #[test]
    fn test_object_url_escapes_reserved_characters() {
        let client = HttpTrackingLookup::new("https://api.test/v1/objects").unwrap();
        let url = client.object_url("AB#12/../../admin?x=1");

        assert_eq!(url.fragment(), None);
        assert_eq!(url.query(), None);
        assert_eq!(url.path(), "/v1/objects/AB%2312%2F..%2F..%2Fadmin%3Fx=1");
        assert_eq!(url.path_segments().map(|s| s.count()), Some(3));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(HttpTrackingLookup::new("not a url").is_err());
        assert!(HttpTrackingLookup::new("mailto:ops@example.com").is_err());
    }

    #[test]
    fn test_parse_latest_event() {
        let json = br#"{
            "code": "OBJ001",
            "events": [
                {
                    "code": "RO",
                    "description": "Object in transit - from distribution unit to treatment unit",
                    "date": "2026-03-14T09:41:00-03:00",
                    "unit": {"city": "CAJAMAR", "state": "SP", "type": "CTE"}
                },
                {
                    "code": "PO",
                    "description": "Object posted",
                    "date": "2026-03-13T16:02:00-03:00",
                    "unit": {"city": "CAMPINAS", "state": "SP"}
                }
            ]
        }"#;

        let location = parse_tracking_response(json).unwrap().expect("location");
        assert_eq!(location.city_state, "CAJAMAR / SP");
        assert_eq!(location.event_code, "RO");
        assert_eq!(location.timestamp_text, "14/03/2026 09:41");
        assert!(location.description.starts_with("Object in transit"));
    }

    #[test]
    fn test_parse_no_events_is_none() {
        assert_eq!(parse_tracking_response(br#"{"code": "X", "events": []}"#).unwrap(), None);
        assert_eq!(parse_tracking_response(br#"{"code": "X"}"#).unwrap(), None);
    }

    #[test]
    fn test_parse_event_without_unit_is_none() {
        let json = br#"{"events": [{"code": "BDE", "description": "Awaiting"}]}"#;
        assert_eq!(parse_tracking_response(json).unwrap(), None);
    }

    #[test]
    fn test_parse_state_only_unit() {
        let json = br#"{"events": [{"code": "RO", "unit": {"state": "BA"}}]}"#;
        let location = parse_tracking_response(json).unwrap().unwrap();
        assert_eq!(location.city_state, "BA");
        assert_eq!(location.timestamp_text, "");
    }

    #[test]
    fn test_parse_non_rfc3339_date_passes_through() {
        let json = br#"{"events": [{"code": "RO", "date": "yesterday", "unit": {"city": "Natal"}}]}"#;
        let location = parse_tracking_response(json).unwrap().unwrap();
        assert_eq!(location.timestamp_text, "yesterday");
    }

    #[test]
    fn test_parse_invalid_json_is_error() {
        let result = parse_tracking_response(b"<html>rate limited</html>");
        assert!(matches!(result, Err(LookupError::JsonError(_))));
    }
}
