//! Integration tests for the tracking location cache.
//!
//! These tests drive the cache through its public API with mock lookup
//! sources:
//! - Single in-flight batch run (reentrancy guard)
//! - Inter-batch pacing in virtual time
//! - TTL expiry and negative caching
//! - Shutdown while a batch is in flight
//!
//! Run with: `cargo test --test tracking_cache_integration`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use shiptrack::time::ManualClock;
use shiptrack::tracking::{
    CacheUpdate, FetchOutcome, LookupError, TrackingCacheConfig, TrackingLocation,
    TrackingLocationCache, TrackingLookup,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// Lookup that answers instantly, failing for codes starting with "BAD".
#[derive(Clone, Default)]
struct InstantLookup {
    calls: Arc<AtomicUsize>,
}

impl TrackingLookup for InstantLookup {
    async fn lookup(&self, code: &str) -> Result<Option<TrackingLocation>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if code.starts_with("BAD") {
            return Err(LookupError::UnexpectedStatus(502));
        }
        Ok(Some(location("RECIFE / PE")))
    }
}

/// Lookup that blocks until the test opens the gate.
#[derive(Clone)]
struct GatedLookup {
    gate: Arc<Semaphore>,
    calls: Arc<AtomicUsize>,
}

impl GatedLookup {
    fn closed() -> Self {
        Self {
            gate: Arc::new(Semaphore::new(0)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn open(&self) {
        self.gate.add_permits(Semaphore::MAX_PERMITS / 2);
    }
}

impl TrackingLookup for GatedLookup {
    async fn lookup(&self, _code: &str) -> Result<Option<TrackingLocation>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| LookupError::HttpError(e.to_string()))?;
        Ok(Some(location("MANAUS / AM")))
    }
}

fn location(city_state: &str) -> TrackingLocation {
    TrackingLocation {
        city_state: city_state.to_string(),
        description: "Object in transit".to_string(),
        timestamp_text: "10/04/2026 08:15".to_string(),
        event_code: "RO".to_string(),
    }
}

fn codes(prefix: &str, n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("{prefix}{i:03}BR")).collect()
}

async fn wait_until_fetching<L: TrackingLookup>(cache: &TrackingLocationCache<L>) {
    while !cache.is_fetching() {
        tokio::task::yield_now().await;
    }
}

// ============================================================================
// Reentrancy
// ============================================================================

#[tokio::test]
async fn test_second_trigger_while_in_flight_is_skipped() {
    let lookup = GatedLookup::closed();
    let cache = Arc::new(TrackingLocationCache::new(
        lookup.clone(),
        TrackingCacheConfig::default(),
    ));

    let first = cache.spawn_ensure_fresh(codes("AA", 3));
    wait_until_fetching(&cache).await;

    let second = cache.ensure_fresh(codes("BB", 3)).await;
    assert_eq!(second, FetchOutcome::AlreadyInFlight);
    assert!(cache.stats().fetching);

    lookup.open();
    let first = first.await.unwrap();

    assert_eq!(first.report().unwrap().batches, vec![3]);
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 3);
    assert!(!cache.is_fetching());

    // Guard is released: the skipped codes go through on the next trigger
    let third = cache.ensure_fresh(codes("BB", 3)).await;
    assert_eq!(third.report().unwrap().looked_up(), 3);
    assert_eq!(cache.len(), 6);
}

// ============================================================================
// Pacing
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_batches_are_paced_by_delay() {
    let lookup = InstantLookup::default();
    let cache = TrackingLocationCache::new(lookup.clone(), TrackingCacheConfig::default());

    let start = tokio::time::Instant::now();
    let outcome = cache.ensure_fresh(codes("PC", 25)).await;
    let elapsed = start.elapsed();

    let report = outcome.report().unwrap();
    assert_eq!(report.batches, vec![10, 10, 5]);
    assert_eq!(report.delays, 2);
    // Two 500 ms pauses, none after the last batch
    assert!(elapsed >= Duration::from_millis(1000), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(1500), "elapsed {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn test_single_batch_takes_no_delay() {
    let cache = TrackingLocationCache::new(InstantLookup::default(), TrackingCacheConfig::default());

    let start = tokio::time::Instant::now();
    cache.ensure_fresh(codes("SB", 10)).await;

    assert!(start.elapsed() < Duration::from_millis(500));
}

#[tokio::test(start_paused = true)]
async fn test_excess_codes_wait_for_next_trigger() {
    let lookup = InstantLookup::default();
    let cache = TrackingLocationCache::new(lookup.clone(), TrackingCacheConfig::default());
    let all = codes("EX", 42);

    let first = cache.ensure_fresh(&all).await;
    assert_eq!(first.report().unwrap().looked_up(), 30);
    assert_eq!(first.report().unwrap().deferred, 12);

    let second = cache.ensure_fresh(&all).await;
    assert_eq!(second.report().unwrap().batches, vec![10, 2]);
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 42);

    assert_eq!(cache.ensure_fresh(&all).await, FetchOutcome::UpToDate);
}

// ============================================================================
// TTL and negative caching
// ============================================================================

#[tokio::test]
async fn test_entries_expire_after_ttl() {
    let lookup = InstantLookup::default();
    let clock = Arc::new(ManualClock::new());
    let cache = TrackingLocationCache::with_clock(
        lookup.clone(),
        TrackingCacheConfig::default().with_batch_delay(Duration::ZERO),
        clock.clone(),
    );

    cache.ensure_fresh(["QA123BR"]).await;
    assert!(cache.get_fresh_location("QA123BR").is_some());

    clock.advance(Duration::from_secs(3600));
    assert!(cache.get_fresh_location("QA123BR").is_some(), "exactly at TTL is fresh");

    clock.advance(Duration::from_secs(1));
    assert!(cache.get_fresh_location("QA123BR").is_none());
    // Stale entries are still readable
    assert!(cache.get_location("QA123BR").is_some());
    assert_eq!(cache.stats().stale, 1);

    let outcome = cache.ensure_fresh(["QA123BR"]).await;
    assert_eq!(outcome.report().unwrap().looked_up(), 1);
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_failed_lookup_is_not_retried_within_ttl() {
    let lookup = InstantLookup::default();
    let cache = TrackingLocationCache::new(
        lookup.clone(),
        TrackingCacheConfig::default().with_batch_delay(Duration::ZERO),
    );

    let outcome = cache.ensure_fresh(["BAD001BR", "OK001BR"]).await;
    let report = outcome.report().unwrap();
    assert_eq!(report.failed, 1);
    assert_eq!(report.found, 1);

    assert!(cache.entry("BAD001BR").unwrap().is_negative());
    assert_eq!(cache.get_location("BAD001BR"), None);

    assert_eq!(cache.ensure_fresh(["BAD001BR"]).await, FetchOutcome::UpToDate);
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_manual_refresh_ignores_ttl() {
    let lookup = InstantLookup::default();
    let cache = TrackingLocationCache::new(
        lookup.clone(),
        TrackingCacheConfig::default().with_batch_delay(Duration::ZERO),
    );
    let mut updates = cache.subscribe();

    cache.ensure_fresh(["RF001BR"]).await;
    let outcome = cache.refresh(["RF001BR"]).await;

    assert_eq!(outcome.report().unwrap().looked_up(), 1);
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 2);

    assert!(matches!(updates.try_recv().unwrap(), CacheUpdate::BatchStored { .. }));
    assert_eq!(updates.try_recv().unwrap(), CacheUpdate::Cleared);
    assert!(matches!(updates.try_recv().unwrap(), CacheUpdate::BatchStored { .. }));
}

// ============================================================================
// Shutdown
// ============================================================================

#[tokio::test]
async fn test_shutdown_discards_in_flight_results() {
    let lookup = GatedLookup::closed();
    let cache = Arc::new(TrackingLocationCache::new(
        lookup.clone(),
        TrackingCacheConfig::default(),
    ));

    let run = cache.spawn_ensure_fresh(codes("SD", 4));
    wait_until_fetching(&cache).await;

    cache.shutdown();
    lookup.open();

    let outcome = run.await.unwrap();
    assert!(outcome.report().unwrap().abandoned);
    assert!(cache.is_empty());
    assert_eq!(cache.ensure_fresh(codes("SD", 4)).await, FetchOutcome::ShutDown);
}
