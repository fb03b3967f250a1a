//! Marker jitter.
//!
//! Shipments that share a city would otherwise stack on one pixel. Each
//! marker gets a small offset drawn from an RNG seeded by the shipment key
//! and the role of the point (origin, destination, fix), so the same
//! shipment always lands in the same spot and animation stays stable
//! between projection passes and across builds.
//!
//! The RNG seed is the SHA-256 of `seed (u64 LE) | key length (u64 LE) |
//! key | role`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

use crate::geo::GeoPoint;

/// Default maximum offset per axis, in degrees.
///
/// Keeps the total spread within 0.3 degrees so jittered markers never
/// drift into a neighbouring state.
pub const DEFAULT_JITTER_DEGREES: f64 = 0.15;

/// Upper bound accepted for the per-axis offset.
const MAX_JITTER_DEGREES: f64 = 0.15;

/// Deterministic jitter source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jitter {
    max_degrees: f64,
    seed: u64,
}

impl Default for Jitter {
    fn default() -> Self {
        Self::new(DEFAULT_JITTER_DEGREES, 0)
    }
}

impl Jitter {
    /// Create a jitter source.
    ///
    /// `max_degrees` is clamped to `[0, 0.15]`.
    pub fn new(max_degrees: f64, seed: u64) -> Self {
        let max_degrees = if max_degrees.is_finite() {
            max_degrees.clamp(0.0, MAX_JITTER_DEGREES)
        } else {
            0.0
        };
        Self { max_degrees, seed }
    }

    /// Jitter source that leaves points untouched.
    pub fn disabled() -> Self {
        Self::new(0.0, 0)
    }

    /// Maximum offset per axis, in degrees.
    pub fn max_degrees(&self) -> f64 {
        self.max_degrees
    }

    /// Offset `point` by a deterministic amount derived from `key` and `role`.
    pub fn apply(&self, point: GeoPoint, key: &str, role: &str) -> GeoPoint {
        if self.max_degrees == 0.0 {
            return point;
        }

        let mut rng = StdRng::from_seed(self.rng_seed(key, role));
        let dlat = rng.gen_range(-self.max_degrees..=self.max_degrees);
        let dlng = rng.gen_range(-self.max_degrees..=self.max_degrees);
        point.offset(dlat, dlng)
    }

    fn rng_seed(&self, key: &str, role: &str) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.seed.to_le_bytes());
        hasher.update((key.len() as u64).to_le_bytes());
        hasher.update(key.as_bytes());
        hasher.update(role.as_bytes());

        let mut seed = [0u8; 32];
        seed.copy_from_slice(&hasher.finalize());
        seed
    }
}
