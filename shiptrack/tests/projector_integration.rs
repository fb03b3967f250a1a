//! Integration tests for shipment position projection.
//!
//! These tests exercise the full read path: records → tracking cache →
//! projector, including the override rule and TTL fallback.
//!
//! Run with: `cargo test --test projector_integration`

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use shiptrack::geo::{resolve_coordinates, resolve_location_text};
use shiptrack::projector::{codes_to_track, ProjectorConfig, ShipmentPositionProjector};
use shiptrack::route::{build_route, progress_for_status};
use shiptrack::shipment::{Address, LifecycleStatus, ShipmentRecord};
use shiptrack::time::ManualClock;
use shiptrack::tracking::{
    LookupError, TrackingCacheConfig, TrackingLocation, TrackingLocationCache, TrackingLookup,
};

/// Lookup answering from a fixed table of code → "CITY / UF".
struct TableLookup(HashMap<&'static str, &'static str>);

impl TrackingLookup for TableLookup {
    async fn lookup(&self, code: &str) -> Result<Option<TrackingLocation>, LookupError> {
        Ok(self.0.get(code).map(|city_state| TrackingLocation {
            city_state: city_state.to_string(),
            description: "Object in transit - from unit to unit".to_string(),
            timestamp_text: "21/06/2026 14:30".to_string(),
            event_code: "RO".to_string(),
        }))
    }
}

fn record(id: &str, code: Option<&str>, status: LifecycleStatus) -> ShipmentRecord {
    ShipmentRecord {
        id: id.to_string(),
        tracking_code: code.map(str::to_string),
        status,
        origin: Address::new("Porto Alegre", "RS"),
        destination: Address::new("Fortaleza", "CE"),
    }
}

fn cache_with(
    table: &[(&'static str, &'static str)],
) -> (TrackingLocationCache<TableLookup>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let cache = TrackingLocationCache::with_clock(
        TableLookup(table.iter().copied().collect()),
        TrackingCacheConfig::default().with_batch_delay(Duration::ZERO),
        clock.clone(),
    );
    (cache, clock)
}

#[tokio::test]
async fn test_tracking_fix_wins_for_in_transit_only() {
    let records = vec![
        record("1", Some("FX001BR"), LifecycleStatus::InTransit),
        record("2", Some("FX002BR"), LifecycleStatus::Delivered),
        record("3", Some("NOFIX01BR"), LifecycleStatus::InTransit),
    ];
    let (cache, _) = cache_with(&[("FX001BR", "CURITIBA / PR"), ("FX002BR", "MACEIO / AL")]);

    let codes = codes_to_track(&records);
    assert_eq!(codes, vec!["FX001BR", "NOFIX01BR"]);
    cache.ensure_fresh(&codes).await;

    let projector = ShipmentPositionProjector::without_jitter();
    let projected = projector.project(&records, &cache);

    // 1: overridden by the fix
    let curitiba = resolve_location_text("CURITIBA / PR");
    assert!(projected[0].current_position.approx_eq(&curitiba, 1e-9));
    assert_eq!(projected[0].tracking_location.as_ref().unwrap().city_state, "CURITIBA / PR");

    // 2: delivered, never looked up, sits at the destination
    let fortaleza = resolve_coordinates(Some("Fortaleza"), Some("CE"));
    assert!(projected[1].current_position.approx_eq(&fortaleza, 1e-9));
    assert!(projected[1].tracking_location.is_none());

    // 3: lookup found nothing, falls back to the route model
    assert_eq!(Some(&projected[2].current_position), projected[2].route_points.last());
    assert!(projected[2].tracking_location.is_none());
}

#[tokio::test]
async fn test_expired_fix_falls_back_to_route() {
    let records = vec![record("1", Some("FX001BR"), LifecycleStatus::InTransit)];
    let (cache, clock) = cache_with(&[("FX001BR", "BRASILIA / DF")]);
    cache.ensure_fresh(codes_to_track(&records)).await;

    let projector = ShipmentPositionProjector::without_jitter();
    assert!(projector.project(&records, &cache)[0].has_tracking_fix());

    clock.advance(Duration::from_secs(3601));
    let projected = projector.project(&records, &cache);

    assert!(!projected[0].has_tracking_fix());
    let expected = build_route(
        projected[0].origin,
        projected[0].destination,
        progress_for_status(LifecycleStatus::InTransit),
    );
    assert_eq!(projected[0].route_points, expected);
    assert_eq!(projected[0].current_position, *expected.last().unwrap());
}

#[tokio::test]
async fn test_projection_follows_record_status_changes() {
    let (cache, _) = cache_with(&[]);
    let projector = ShipmentPositionProjector::new(ProjectorConfig::default());

    let mut shipment = record("77", Some("ST077BR"), LifecycleStatus::Posted);
    let posted = projector.project_one(&shipment, &cache);

    shipment.status = LifecycleStatus::AwaitingPickup;
    let awaiting = projector.project_one(&shipment, &cache);

    assert_eq!(posted.progress, 0.15);
    assert_eq!(awaiting.progress, 0.9);
    assert_eq!(posted.route_points.len(), 7);
    assert_eq!(awaiting.route_points.len(), 45);
    // The shorter route is a prefix of the longer one
    assert_eq!(awaiting.route_points[..7], posted.route_points[..]);
    // Jitter depends only on the shipment, not its status
    assert_eq!(posted.origin, awaiting.origin);
}
