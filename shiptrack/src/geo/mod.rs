//! Geographic lookup for shipment addresses.
//!
//! Resolves free-text city and state names to an approximate [`GeoPoint`]
//! using two static tables: major cities and state capitals.
//!
//! # Resolution Order
//!
//! 1. City name (case-folded, diacritics stripped) in the major-city table
//! 2. State code (or state name) in the state-capital table
//! 3. [`DEFAULT_POINT`]
//!
//! Resolution is total: every input, including empty or garbage text,
//! yields a point. Route rendering must never fail because of unknown
//! geography.
//!
//! # Example
//!
//! ```
//! use shiptrack::geo::{resolve_coordinates, DEFAULT_POINT};
//!
//! let sp = resolve_coordinates(Some("São Paulo"), Some("SP"));
//! assert!((sp.lat - -23.5505).abs() < 1e-6);
//!
//! // Unknown city falls back to the state capital
//! let rj = resolve_coordinates(Some("Nowhere"), Some("rj"));
//! assert!((rj.lat - -22.9068).abs() < 1e-6);
//!
//! // Nothing known at all
//! assert_eq!(resolve_coordinates(None, None), DEFAULT_POINT);
//! ```

mod tables;
mod types;

pub use tables::DEFAULT_POINT;
pub use types::GeoPoint;

use tables::{CITY_TABLE, STATE_CAPITAL_TABLE, STATE_NAME_TABLE};

/// Resolve a city/state pair to a geographic point.
///
/// Never fails; see the module documentation for the fallback order.
pub fn resolve_coordinates(city: Option<&str>, state: Option<&str>) -> GeoPoint {
    if let Some(point) = city.and_then(lookup_city) {
        return point;
    }

    if let Some(point) = state.and_then(lookup_state) {
        return point;
    }

    tracing::trace!(?city, ?state, "Location unresolved, using default point");
    DEFAULT_POINT
}

/// Resolve the `"CITY / UF"` text carried by a tracking event.
pub fn resolve_location_text(text: &str) -> GeoPoint {
    let (city, state) = parse_city_state(text);
    resolve_coordinates(city, state)
}

/// Split tracking-event location text into city and state parts.
///
/// Accepts `/`, `-` and `,` as separators, using the last one present so
/// hyphenated city names keep their hyphen when a later separator exists.
/// A lone token is treated as a state code when it is two letters long,
/// otherwise as a city.
pub fn parse_city_state(text: &str) -> (Option<&str>, Option<&str>) {
    let text = text.trim();
    if text.is_empty() {
        return (None, None);
    }

    let split_at = ['/', ',', '-']
        .iter()
        .filter_map(|sep| text.rfind(*sep))
        .max();

    match split_at {
        Some(idx) => {
            let city = non_empty(&text[..idx]);
            let state = non_empty(&text[idx + 1..]);
            (city, state)
        }
        None if text.len() == 2 && text.chars().all(|c| c.is_ascii_alphabetic()) => {
            (None, Some(text))
        }
        None => (Some(text), None),
    }
}

/// Normalize a place name for table lookup.
///
/// Lowercases, strips Latin diacritics, and collapses runs of whitespace.
pub fn normalize_name(name: &str) -> String {
    let folded: String = name.chars().flat_map(char::to_lowercase).map(fold_diacritic).collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn lookup_city(city: &str) -> Option<GeoPoint> {
    let key = normalize_name(city);
    if key.is_empty() {
        return None;
    }
    CITY_TABLE.get(key.as_str()).copied()
}

fn lookup_state(state: &str) -> Option<GeoPoint> {
    let trimmed = state.trim();
    if trimmed.is_empty() {
        return None;
    }

    let code = trimmed.to_ascii_uppercase();
    if let Some(point) = STATE_CAPITAL_TABLE.get(code.as_str()) {
        return Some(*point);
    }

    let name = normalize_name(trimmed);
    STATE_NAME_TABLE
        .get(name.as_str())
        .and_then(|code| STATE_CAPITAL_TABLE.get(code))
        .copied()
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

/// Map a lowercase Latin letter with a diacritic to its base letter.
fn fold_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}
