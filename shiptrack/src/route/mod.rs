//! Route geometry for animated shipment markers.
//!
//! A route is a quadratic Bezier curve from origin to destination. The
//! control point sits off the segment midpoint so parallel routes fan out
//! instead of overlapping. Routes grow with progress: a shipment that is
//! 40% along only owns the first 40% of its samples, and the last sample is
//! where its marker is drawn.
//!
//! ```text
//!            control
//!               *
//!          .-'     '-.
//!   origin *           * destination
//! ```

mod jitter;

pub use jitter::{Jitter, DEFAULT_JITTER_DEGREES};

use crate::geo::GeoPoint;
use crate::shipment::LifecycleStatus;

/// Number of parametric samples along a full route.
pub const ROUTE_SAMPLES: usize = 50;

/// Control-point offset as a fraction of the origin-destination distance.
pub const CURVE_BEND: f64 = 0.15;

/// Canonical progress fraction for a lifecycle status.
///
/// This table is the only notion of "how far along" a shipment is when no
/// real tracking fix is available.
pub fn progress_for_status(status: LifecycleStatus) -> f64 {
    match status {
        LifecycleStatus::PrePosted => 0.0,
        LifecycleStatus::Posted => 0.15,
        LifecycleStatus::Collected => 0.35,
        LifecycleStatus::InTransit => 0.65,
        LifecycleStatus::OutForDelivery => 0.8,
        LifecycleStatus::AwaitingPickup => 0.9,
        LifecycleStatus::Delivered => 1.0,
        LifecycleStatus::Canceled => 0.0,
    }
}

/// Control point of the route curve.
///
/// Offset from the midpoint by `distance * CURVE_BEND` along the left-hand
/// perpendicular of the origin → destination direction. Coincident
/// endpoints yield the midpoint itself.
pub fn control_point(origin: &GeoPoint, destination: &GeoPoint) -> GeoPoint {
    let mid = origin.midpoint(destination);
    let distance = origin.distance_to(destination);
    if distance == 0.0 {
        return mid;
    }

    let dlat = (destination.lat - origin.lat) / distance;
    let dlng = (destination.lng - origin.lng) / distance;
    let bend = distance * CURVE_BEND;

    // Rotate (dlng, dlat) by +90 degrees in the x=lng, y=lat plane
    mid.offset(dlng * bend, -dlat * bend)
}

/// Point on the quadratic Bezier curve at parameter `t` in `[0, 1]`.
pub fn bezier_point(origin: &GeoPoint, control: &GeoPoint, destination: &GeoPoint, t: f64) -> GeoPoint {
    let u = 1.0 - t;
    let a = u * u;
    let b = 2.0 * u * t;
    let c = t * t;
    GeoPoint::new(
        a * origin.lat + b * control.lat + c * destination.lat,
        a * origin.lng + b * control.lng + c * destination.lng,
    )
}

/// Sample the route consumed so far.
///
/// Samples [`ROUTE_SAMPLES`] evenly spaced parameters on `t ∈ [0, 1]` and
/// returns the first `floor(ROUTE_SAMPLES * progress)` of them. The result
/// always contains at least the origin, so `progress == 0.0` yields
/// `[origin]` and `progress == 1.0` ends exactly at `destination`.
///
/// Progress outside `[0, 1]` is clamped; NaN counts as zero.
pub fn build_route(origin: GeoPoint, destination: GeoPoint, progress: f64) -> Vec<GeoPoint> {
    let progress = clamp_progress(progress);
    let control = control_point(&origin, &destination);

    let count = ((ROUTE_SAMPLES as f64 * progress).floor() as usize).clamp(1, ROUTE_SAMPLES);
    let last = (ROUTE_SAMPLES - 1) as f64;

    (0..count)
        .map(|i| match i {
            0 => origin,
            i if i == ROUTE_SAMPLES - 1 => destination,
            i => bezier_point(&origin, &control, &destination, i as f64 / last),
        })
        .collect()
}

/// Clamp a progress value into `[0, 1]`, mapping NaN to zero.
pub fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}
