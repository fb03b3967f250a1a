//! Periodic refresh of in-transit shipments.
//!
//! The [`AutoRefreshController`] polls the listing backend every five
//! minutes while the consuming view is visible, and merges the result into
//! its working set without touching records in any other status.
//!
//! # Architecture
//!
//! ```text
//! Scheduler (TokioScheduler | ManualScheduler)
//!     │  timer / visible / hidden callbacks
//!     ▼
//! AutoRefreshController ──► ShipmentListing trait → HttpShipmentListing
//!     │
//!     ├── merge_in_transit() (by id, then tracking code)
//!     │
//!     └── broadcast::Sender<RecordsUpdate>
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let scheduler = Arc::new(TokioScheduler::new());
//! let listing = HttpShipmentListing::new("http://localhost:8080/api")?;
//! let controller = Arc::new(AutoRefreshController::new(listing, scheduler, config));
//! controller.set_records(records);
//! controller.start();
//! ```

mod backend;
mod config;
mod controller;
mod error;
mod merge;
mod scheduler;

pub use backend::{parse_listing, HttpShipmentListing, ShipmentListing};
pub use config::{
    AutoRefreshConfig, DEFAULT_BACKEND_URL, DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE,
    DEFAULT_REFRESH_INTERVAL_SECS, MIN_REFRESH_INTERVAL,
};
pub use controller::{
    AutoRefreshController, RecordsUpdate, RefreshOutcome, RefreshState, RefreshStatus,
};
pub use error::ListingError;
pub use merge::{merge_in_transit, MergeSummary};
pub use scheduler::{
    Callback, CancelToken, ManualScheduler, Scheduler, TokioScheduler, VisibilitySignal,
};
