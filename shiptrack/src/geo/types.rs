//! Geographic point type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A geographic point in decimal degrees.
///
/// Distances between points are planar (degree-space) because they only
/// drive curve shaping on the map, never real-world measurements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees (positive north).
    pub lat: f64,
    /// Longitude in decimal degrees (positive east).
    pub lng: f64,
}

impl GeoPoint {
    /// Create a new point.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Planar distance to another point, in degrees.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let dlat = other.lat - self.lat;
        let dlng = other.lng - self.lng;
        (dlat * dlat + dlng * dlng).sqrt()
    }

    /// Midpoint of the segment between `self` and `other`.
    pub fn midpoint(&self, other: &GeoPoint) -> GeoPoint {
        GeoPoint::new((self.lat + other.lat) / 2.0, (self.lng + other.lng) / 2.0)
    }

    /// Return this point shifted by the given offsets.
    pub fn offset(&self, dlat: f64, dlng: f64) -> GeoPoint {
        GeoPoint::new(self.lat + dlat, self.lng + dlng)
    }

    /// Check whether two points coincide within `tolerance` degrees per axis.
    pub fn approx_eq(&self, other: &GeoPoint, tolerance: f64) -> bool {
        (self.lat - other.lat).abs() <= tolerance && (self.lng - other.lng).abs() <= tolerance
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_planar() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_midpoint() {
        let a = GeoPoint::new(-23.55, -46.63);
        let b = GeoPoint::new(-22.91, -43.17);
        let mid = a.midpoint(&b);
        assert!(mid.approx_eq(&GeoPoint::new(-23.23, -44.90), 1e-9));
    }

    #[test]
    fn test_display_uses_five_decimals() {
        let p = GeoPoint::new(-15.7801, -47.9292);
        assert_eq!(p.to_string(), "-15.78010, -47.92920");
    }
}
