//! Shipment position projection.
//!
//! Turns shipment records into map-ready positions. For each record:
//!
//! 1. Origin and destination are resolved by [`crate::geo`] and jittered
//!    independently
//! 2. Progress comes from the status table in [`crate::route`]
//! 3. The route consumed so far is sampled; its last point is the marker
//! 4. An in-transit shipment with a fresh cached tracking fix is drawn at
//!    the fix instead
//!
//! Projection is synchronous and keeps no state of its own, so it can be
//! rerun on every record or cache update.

mod engine;
mod types;

pub use engine::{
    codes_to_track, LocationSource, NoTracking, ProjectorConfig, ShipmentPositionProjector,
};
pub use types::ProjectedShipment;
