//! Projection output types.

use serde::Serialize;

use crate::geo::GeoPoint;
use crate::shipment::LifecycleStatus;
use crate::tracking::TrackingLocation;

/// Where a shipment is drawn and how it got there.
///
/// Derived on every projection pass and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedShipment {
    /// Id of the source record.
    pub shipment_id: String,

    /// Status the projection was computed from.
    pub status: LifecycleStatus,

    /// Jittered origin point.
    pub origin: GeoPoint,

    /// Jittered destination point.
    pub destination: GeoPoint,

    /// Marker position: last route sample, or the resolved tracking fix.
    pub current_position: GeoPoint,

    /// Progress fraction from the status table, in `[0, 1]`.
    pub progress: f64,

    /// Route consumed so far; never empty.
    pub route_points: Vec<GeoPoint>,

    /// Tracking fix that overrode `current_position`, if any.
    pub tracking_location: Option<TrackingLocation>,
}

impl ProjectedShipment {
    /// Whether `current_position` comes from a real tracking fix.
    pub fn has_tracking_fix(&self) -> bool {
        self.tracking_location.is_some()
    }
}
