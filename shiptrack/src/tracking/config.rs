//! Configuration for the tracking location cache.

use std::time::Duration;

/// Default lookup API base URL.
pub const DEFAULT_TRACKING_API_URL: &str = "https://tracking.example.com/v1/objects";

/// Default entry time-to-live (1 hour).
pub const DEFAULT_TTL_SECS: u64 = 3600;

/// Default number of lookups per batch.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Default delay between batches (milliseconds).
pub const DEFAULT_BATCH_DELAY_MS: u64 = 500;

/// Default number of batches a single trigger may run.
pub const DEFAULT_MAX_BATCHES_PER_TRIGGER: usize = 3;

/// Default HTTP timeout for one lookup (seconds).
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;

/// Tuning for [`TrackingLocationCache`](super::TrackingLocationCache).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingCacheConfig {
    /// Entries older than this are refetched.
    pub ttl: Duration,

    /// Lookups issued concurrently per batch.
    pub batch_size: usize,

    /// Pause between consecutive batches.
    pub batch_delay: Duration,

    /// Batches one trigger may run; bounds the latency of a single call.
    pub max_batches_per_trigger: usize,
}

impl Default for TrackingCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(DEFAULT_TTL_SECS),
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay: Duration::from_millis(DEFAULT_BATCH_DELAY_MS),
            max_batches_per_trigger: DEFAULT_MAX_BATCHES_PER_TRIGGER,
        }
    }
}

impl TrackingCacheConfig {
    /// Effective batch size (never zero).
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.max(1)
    }

    /// Maximum codes considered per trigger.
    pub fn max_codes_per_trigger(&self) -> usize {
        self.effective_batch_size()
            .saturating_mul(self.max_batches_per_trigger.max(1))
    }

    /// Builder: set the TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Builder: set the inter-batch delay.
    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }
}
