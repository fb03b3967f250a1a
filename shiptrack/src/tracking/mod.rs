//! Tracking location cache.
//!
//! Keeps the latest known location of each shipment, keyed by tracking
//! code, with a one-hour TTL. Entries are filled by batched, rate-limited
//! calls to an external [`TrackingLookup`] source:
//!
//! - Batches of 10 lookups run concurrently; batches run one after another
//! - 500 ms pause between batches, none after the last
//! - At most 30 codes per trigger; the rest wait for the next trigger
//! - Failures and empty answers become negative entries and are not
//!   retried until they expire
//! - Only one batch run may be in flight per cache
//!
//! # Architecture
//!
//! ```text
//! TrackingLocationCache
//!     │
//!     ├── TrackingLookup trait → HttpTrackingLookup (reqwest)
//!     │
//!     ├── DashMap<code, CacheEntry>   ◄── get_location() (never blocks)
//!     │
//!     └── broadcast::Sender<CacheUpdate> → projection consumers
//! ```

mod cache;
mod client;
mod config;
mod error;
mod types;

pub use cache::TrackingLocationCache;
pub use client::{parse_tracking_response, HttpTrackingLookup, TrackingLookup};
pub use config::{
    TrackingCacheConfig, DEFAULT_BATCH_DELAY_MS, DEFAULT_BATCH_SIZE, DEFAULT_LOOKUP_TIMEOUT_SECS,
    DEFAULT_MAX_BATCHES_PER_TRIGGER, DEFAULT_TRACKING_API_URL, DEFAULT_TTL_SECS,
};
pub use error::LookupError;
pub use types::{CacheEntry, CacheStats, CacheUpdate, FetchOutcome, FetchReport, TrackingLocation};
