//! Tracking cache data types.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// One real-world tracking fix for a shipment.
///
/// Produced only by successful lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingLocation {
    /// Location text of the event, e.g. `"SAO PAULO / SP"`.
    pub city_state: String,
    /// Free-text event description.
    pub description: String,
    /// Event time formatted for display (`dd/mm/YYYY HH:MM`).
    pub timestamp_text: String,
    /// Carrier event code.
    pub event_code: String,
}

/// Cached outcome of one lookup.
///
/// `location: None` is a negative entry: the lookup failed or returned no
/// usable event. It is cached like any other result so the code is not
/// retried until the entry expires.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// Tracking code this entry belongs to.
    pub tracking_code: String,
    /// Location found, if any.
    pub location: Option<TrackingLocation>,
    /// When the lookup settled.
    pub fetched_at: Instant,
}

impl CacheEntry {
    /// Whether this is a negative entry.
    pub fn is_negative(&self) -> bool {
        self.location.is_none()
    }

    /// Age of the entry at `now`.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.fetched_at)
    }

    /// An entry is stale once it is older than `ttl`.
    pub fn is_stale(&self, now: Instant, ttl: Duration) -> bool {
        self.age(now) > ttl
    }
}

/// Point-in-time cache statistics for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Total entries, positive and negative.
    pub entries: usize,
    /// Negative entries.
    pub negative: usize,
    /// Entries older than the TTL.
    pub stale: usize,
    /// Whether a batch run is in flight.
    pub fetching: bool,
}

/// Notification published after the cache changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheUpdate {
    /// A batch settled and its entries were written.
    BatchStored {
        /// Codes written by this batch.
        codes: Vec<String>,
    },
    /// The cache was cleared by a manual refresh.
    Cleared,
}

/// Summary of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchReport {
    /// Size of each batch, in execution order.
    pub batches: Vec<usize>,
    /// Number of inter-batch delays taken.
    pub delays: usize,
    /// Lookups that produced a location.
    pub found: usize,
    /// Lookups that succeeded without a usable event.
    pub empty: usize,
    /// Lookups that failed.
    pub failed: usize,
    /// Stale codes left for a later trigger because of the per-trigger cap.
    pub deferred: usize,
    /// The cache was shut down mid-run and remaining results were dropped.
    pub abandoned: bool,
}

impl FetchReport {
    /// Total codes looked up.
    pub fn looked_up(&self) -> usize {
        self.batches.iter().sum()
    }
}

/// Result of an [`ensure_fresh`](super::TrackingLocationCache::ensure_fresh) call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Every requested code already had a fresh entry.
    UpToDate,
    /// Another batch run was in flight; nothing was scheduled.
    AlreadyInFlight,
    /// The cache has been shut down.
    ShutDown,
    /// A batch run executed.
    Completed(FetchReport),
}

impl FetchOutcome {
    /// The report, when a batch run executed.
    pub fn report(&self) -> Option<&FetchReport> {
        match self {
            FetchOutcome::Completed(report) => Some(report),
            _ => None,
        }
    }
}
