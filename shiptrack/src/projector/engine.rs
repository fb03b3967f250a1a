//! Shipment position projection.

use super::types::ProjectedShipment;
use crate::geo::{resolve_coordinates, resolve_location_text, GeoPoint};
use crate::route::{build_route, progress_for_status, Jitter, DEFAULT_JITTER_DEGREES};
use crate::shipment::{Address, ShipmentRecord};
use crate::tracking::{TrackingLocation, TrackingLocationCache, TrackingLookup};

/// Jitter roles; each point of a shipment is offset independently.
const ROLE_ORIGIN: &str = "origin";
const ROLE_DESTINATION: &str = "destination";
const ROLE_FIX: &str = "fix";

/// Source of fresh tracking fixes for the projector.
///
/// Must answer from memory; projection never waits on I/O.
pub trait LocationSource {
    /// Fresh location for `tracking_code`, if one is known.
    fn fresh_location(&self, tracking_code: &str) -> Option<TrackingLocation>;
}

impl<L: TrackingLookup> LocationSource for TrackingLocationCache<L> {
    fn fresh_location(&self, tracking_code: &str) -> Option<TrackingLocation> {
        self.get_fresh_location(tracking_code)
    }
}

/// Source that never has a fix. Projects from the status table alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTracking;

impl LocationSource for NoTracking {
    fn fresh_location(&self, _tracking_code: &str) -> Option<TrackingLocation> {
        None
    }
}

/// Projector settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectorConfig {
    /// Maximum marker offset per axis, in degrees.
    pub jitter_degrees: f64,
    /// Seed mixed into every jitter draw.
    pub seed: u64,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            jitter_degrees: DEFAULT_JITTER_DEGREES,
            seed: 0,
        }
    }
}

/// Combines geographic lookup, route geometry and cached tracking fixes
/// into renderable positions.
#[derive(Debug, Clone, Default)]
pub struct ShipmentPositionProjector {
    jitter: Jitter,
}

impl ShipmentPositionProjector {
    /// Create a projector.
    pub fn new(config: ProjectorConfig) -> Self {
        Self {
            jitter: Jitter::new(config.jitter_degrees, config.seed),
        }
    }

    /// Projector that draws every point exactly where it resolves.
    pub fn without_jitter() -> Self {
        Self {
            jitter: Jitter::disabled(),
        }
    }

    /// Project every record. Output order follows input order.
    pub fn project<S: LocationSource + ?Sized>(
        &self,
        records: &[ShipmentRecord],
        source: &S,
    ) -> Vec<ProjectedShipment> {
        let projected: Vec<_> = records
            .iter()
            .map(|record| self.project_one(record, source))
            .collect();

        tracing::trace!(
            shipments = projected.len(),
            with_fix = projected.iter().filter(|p| p.has_tracking_fix()).count(),
            "Shipments projected"
        );

        projected
    }

    /// Project a single record.
    pub fn project_one<S: LocationSource + ?Sized>(
        &self,
        record: &ShipmentRecord,
        source: &S,
    ) -> ProjectedShipment {
        let key = record.id.as_str();
        let origin = self.jitter.apply(resolve_address(&record.origin), key, ROLE_ORIGIN);
        let destination =
            self.jitter
                .apply(resolve_address(&record.destination), key, ROLE_DESTINATION);

        let progress = progress_for_status(record.status);
        let route_points = build_route(origin, destination, progress);
        // build_route never returns an empty route
        let modelled = route_points.last().copied().unwrap_or(origin);

        let tracking_location = if record.is_in_transit() {
            record.tracking_code().and_then(|code| source.fresh_location(code))
        } else {
            None
        };

        let current_position = match &tracking_location {
            Some(location) => {
                let fix = resolve_location_text(&location.city_state);
                self.jitter.apply(fix, key, ROLE_FIX)
            }
            None => modelled,
        };

        ProjectedShipment {
            shipment_id: record.id.clone(),
            status: record.status,
            origin,
            destination,
            current_position,
            progress,
            route_points,
            tracking_location,
        }
    }
}

/// Tracking codes of in-transit records, in record order, without duplicates.
///
/// These are the codes a projection pass can use fixes for, and so the
/// ones worth handing to the cache.
pub fn codes_to_track(records: &[ShipmentRecord]) -> Vec<String> {
    let mut codes: Vec<String> = Vec::new();
    for code in records
        .iter()
        .filter(|r| r.is_in_transit())
        .filter_map(ShipmentRecord::tracking_code)
    {
        if !codes.iter().any(|c| c == code) {
            codes.push(code.to_string());
        }
    }
    codes
}

fn resolve_address(address: &Address) -> GeoPoint {
    resolve_coordinates(address.city.as_deref(), address.state.as_deref())
}
