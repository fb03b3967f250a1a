//! Time-bounded cache of tracking locations.
//!
//! # Batch Run
//!
//! ```text
//! ensure_fresh(codes)
//!     │
//!     ├── stale/missing subset (dedup, TTL check)      ── empty ──► UpToDate
//!     ├── acquire in-flight guard                      ── busy ───► AlreadyInFlight
//!     ├── cap at batch_size × max_batches_per_trigger
//!     │
//!     └── for each batch (sequential):
//!             sleep(batch_delay)            (not before the first)
//!             join_all(lookups)             (all settle, none abort)
//!             write entries                 (negative on failure/absence)
//!             broadcast CacheUpdate
//! ```
//!
//! # Thread Safety
//!
//! Entries live in a `DashMap`, so [`get_location`](TrackingLocationCache::get_location)
//! never waits on the batch loop. The in-flight flag is the only write-write
//! contention point and is released by a guard on every exit path,
//! including cancellation of the awaiting future.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use futures::future::join_all;
use tokio::sync::broadcast;

use super::client::TrackingLookup;
use super::config::TrackingCacheConfig;
use super::types::{CacheEntry, CacheStats, CacheUpdate, FetchOutcome, FetchReport, TrackingLocation};
use crate::time::{Clock, SystemClock};

/// Capacity of the update broadcast channel.
const UPDATE_CHANNEL_CAPACITY: usize = 64;

/// Releases the in-flight flag when dropped.
struct FetchGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> FetchGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Tracking location cache with batched, rate-limited refresh.
///
/// Owned by one view or session; create one per consumer rather than
/// sharing a process-wide instance.
///
/// # Example
///
/// ```ignore
/// let lookup = HttpTrackingLookup::new(DEFAULT_TRACKING_API_URL)?;
/// let cache = Arc::new(TrackingLocationCache::new(lookup, TrackingCacheConfig::default()));
///
/// cache.ensure_fresh(["OBJ001", "OBJ002"]).await;
/// if let Some(location) = cache.get_location("OBJ001") {
///     println!("{} at {}", location.description, location.city_state);
/// }
/// ```
pub struct TrackingLocationCache<L: TrackingLookup> {
    lookup: L,
    entries: DashMap<String, CacheEntry>,
    fetching: AtomicBool,
    alive: AtomicBool,
    clock: Arc<dyn Clock>,
    config: TrackingCacheConfig,
    updates_tx: broadcast::Sender<CacheUpdate>,
}

impl<L: TrackingLookup> TrackingLocationCache<L> {
    /// Create a cache using the system clock.
    pub fn new(lookup: L, config: TrackingCacheConfig) -> Self {
        Self::with_clock(lookup, config, Arc::new(SystemClock))
    }

    /// Create a cache with a custom clock.
    pub fn with_clock(lookup: L, config: TrackingCacheConfig, clock: Arc<dyn Clock>) -> Self {
        let (updates_tx, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            lookup,
            entries: DashMap::new(),
            fetching: AtomicBool::new(false),
            alive: AtomicBool::new(true),
            clock,
            config,
            updates_tx,
        }
    }

    /// Cache configuration.
    pub fn config(&self) -> &TrackingCacheConfig {
        &self.config
    }

    /// Last known location for a code, fresh or stale.
    ///
    /// Pure read; never performs I/O.
    pub fn get_location(&self, tracking_code: &str) -> Option<TrackingLocation> {
        self.entries
            .get(tracking_code)
            .and_then(|entry| entry.location.clone())
    }

    /// Location for a code only if its entry is within the TTL.
    pub fn get_fresh_location(&self, tracking_code: &str) -> Option<TrackingLocation> {
        let now = self.clock.now();
        self.entries
            .get(tracking_code)
            .filter(|entry| !entry.is_stale(now, self.config.ttl))
            .and_then(|entry| entry.location.clone())
    }

    /// Full entry for a code, including negative entries.
    pub fn entry(&self, tracking_code: &str) -> Option<CacheEntry> {
        self.entries.get(tracking_code).map(|entry| entry.clone())
    }

    /// Whether a code has an entry within the TTL.
    pub fn is_fresh(&self, tracking_code: &str) -> bool {
        let now = self.clock.now();
        self.entries
            .get(tracking_code)
            .is_some_and(|entry| !entry.is_stale(now, self.config.ttl))
    }

    /// Whether a batch run is in flight.
    pub fn is_fetching(&self) -> bool {
        self.fetching.load(Ordering::Acquire)
    }

    /// Whether the cache is still accepting writes.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot statistics.
    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        let mut stats = CacheStats {
            fetching: self.is_fetching(),
            ..Default::default()
        };
        for entry in self.entries.iter() {
            stats.entries += 1;
            if entry.is_negative() {
                stats.negative += 1;
            }
            if entry.is_stale(now, self.config.ttl) {
                stats.stale += 1;
            }
        }
        stats
    }

    /// Subscribe to cache change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<CacheUpdate> {
        self.updates_tx.subscribe()
    }

    /// Codes among `codes` that are missing or stale, deduplicated in input order.
    pub fn stale_codes<I, S>(&self, codes: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let now = self.clock.now();
        let mut seen = HashSet::new();
        codes
            .into_iter()
            .filter_map(|code| {
                let code = code.as_ref().trim();
                (!code.is_empty() && seen.insert(code.to_string())).then(|| code.to_string())
            })
            .filter(|code| {
                self.entries
                    .get(code)
                    .map_or(true, |entry| entry.is_stale(now, self.config.ttl))
            })
            .collect()
    }

    /// Fetch codes whose entries are missing or stale.
    ///
    /// No-op when everything is fresh, when another run is in flight, or
    /// after [`shutdown`](Self::shutdown). Codes beyond the per-trigger cap
    /// are left for the next call.
    pub async fn ensure_fresh<I, S>(&self, codes: I) -> FetchOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.is_alive() {
            return FetchOutcome::ShutDown;
        }

        let mut stale = self.stale_codes(codes);
        if stale.is_empty() {
            return FetchOutcome::UpToDate;
        }

        let Some(_guard) = FetchGuard::acquire(&self.fetching) else {
            tracing::trace!(
                stale = stale.len(),
                "Tracking fetch already in flight, skipping"
            );
            return FetchOutcome::AlreadyInFlight;
        };

        let cap = self.config.max_codes_per_trigger();
        let deferred = stale.len().saturating_sub(cap);
        stale.truncate(cap);

        let mut report = self.run_batches(&stale).await;
        report.deferred = deferred;

        tracing::debug!(
            looked_up = report.looked_up(),
            batches = report.batches.len(),
            found = report.found,
            empty = report.empty,
            failed = report.failed,
            deferred = report.deferred,
            "Tracking batch run finished"
        );

        FetchOutcome::Completed(report)
    }

    /// Clear every entry and refetch `codes`, ignoring the TTL.
    ///
    /// If a run is already in flight the clear still happens; the codes are
    /// then missing and will be fetched by the next trigger.
    pub async fn refresh<I, S>(&self, codes: I) -> FetchOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.clear();
        self.ensure_fresh(codes).await
    }

    /// Remove every entry.
    pub fn clear(&self) {
        if !self.is_alive() {
            return;
        }
        self.entries.clear();
        tracing::debug!("Tracking cache cleared");
        let _ = self.updates_tx.send(CacheUpdate::Cleared);
    }

    /// End the cache's lifetime.
    ///
    /// A batch already in flight may still complete its lookups, but none of
    /// its results are written afterwards.
    pub fn shutdown(&self) {
        if self.alive.swap(false, Ordering::AcqRel) {
            tracing::debug!("Tracking cache shut down");
        }
    }

    async fn run_batches(&self, codes: &[String]) -> FetchReport {
        let mut report = FetchReport::default();

        for (index, batch) in codes.chunks(self.config.effective_batch_size()).enumerate() {
            if index > 0 {
                tokio::time::sleep(self.config.batch_delay).await;
                report.delays += 1;
            }

            if !self.is_alive() {
                report.abandoned = true;
                break;
            }

            tracing::debug!(batch = index + 1, size = batch.len(), "Looking up tracking batch");

            let results = join_all(batch.iter().map(|code| self.lookup.lookup(code))).await;

            report.batches.push(batch.len());
            let fetched_at = self.clock.now();
            let mut written = Vec::with_capacity(batch.len());

            for (code, result) in batch.iter().zip(results) {
                let location = match result {
                    Ok(Some(location)) => {
                        report.found += 1;
                        Some(location)
                    }
                    Ok(None) => {
                        report.empty += 1;
                        None
                    }
                    Err(e) => {
                        report.failed += 1;
                        tracing::debug!(tracking_code = %code, error = %e, "Tracking lookup failed");
                        None
                    }
                };

                // Checked immediately before each write
                if !self.is_alive() {
                    report.abandoned = true;
                    return report;
                }

                self.entries.insert(
                    code.clone(),
                    CacheEntry {
                        tracking_code: code.clone(),
                        location,
                        fetched_at,
                    },
                );
                written.push(code.clone());
            }

            let _ = self.updates_tx.send(CacheUpdate::BatchStored { codes: written });
        }

        report
    }
}

impl<L: TrackingLookup + 'static> TrackingLocationCache<L> {
    /// Run [`ensure_fresh`](Self::ensure_fresh) as a background task.
    ///
    /// For callers that must not wait on the network, such as a render loop.
    pub fn spawn_ensure_fresh(self: &Arc<Self>, codes: Vec<String>) -> tokio::task::JoinHandle<FetchOutcome> {
        let cache = Arc::clone(self);
        tokio::spawn(async move { cache.ensure_fresh(codes).await })
    }
}
