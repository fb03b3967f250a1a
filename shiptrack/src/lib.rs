//! shiptrack - Shipment tracking cache and route animation engine
//!
//! Turns shipment records into positions on a map. Positions come from a
//! model (a status-driven Bezier route between origin and destination)
//! unless a fresh real-world tracking fix is available, in which case the
//! fix wins.
//!
//! # Components
//!
//! - [`geo`] - city/state text to approximate coordinates, never failing
//! - [`route`] - status progress table and route sampling
//! - [`tracking`] - TTL cache of tracking fixes fed by batched lookups
//! - [`refresh`] - periodic, visibility-aware refresh of in-transit records
//! - [`projector`] - combines the above into renderable positions
//!
//! ```text
//! AutoRefreshController ──records──► ShipmentPositionProjector ──► presentation
//!                                          ▲
//! TrackingLocationCache ──fresh fixes──────┘
//! ```
//!
//! # High-Level Usage
//!
//! ```ignore
//! use shiptrack::projector::{codes_to_track, ShipmentPositionProjector};
//! use shiptrack::tracking::{HttpTrackingLookup, TrackingLocationCache};
//!
//! let cache = TrackingLocationCache::new(HttpTrackingLookup::new(api_url)?, Default::default());
//! cache.ensure_fresh(codes_to_track(&records)).await;
//!
//! let projector = ShipmentPositionProjector::default();
//! for shipment in projector.project(&records, &cache) {
//!     draw(shipment.current_position, &shipment.route_points);
//! }
//! ```

pub mod config;
pub mod geo;
pub mod logging;
pub mod projector;
pub mod refresh;
pub mod route;
pub mod shipment;
pub mod time;
pub mod tracking;

/// Version of the shiptrack library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
