//! Configuration for the auto-refresh controller.

use std::time::Duration;

/// Default backend base URL.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080/api";

/// Default refresh interval (5 minutes).
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 300;

/// Default number of records requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Default upper bound on pages fetched per refresh.
pub const DEFAULT_MAX_PAGES: usize = 10;

/// Shortest timer period accepted; tokio intervals reject a zero period.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(1);

/// Tuning for [`AutoRefreshController`](super::AutoRefreshController).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoRefreshConfig {
    /// Whether the periodic timer is armed on start.
    pub enabled: bool,

    /// Period of the refresh timer.
    pub interval: Duration,

    /// Records requested per listing call.
    pub page_size: usize,

    /// Stop paging after this many pages even if the last one was full.
    pub max_pages: usize,
}

impl Default for AutoRefreshConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS),
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl AutoRefreshConfig {
    /// Timer period, never zero.
    pub fn effective_interval(&self) -> Duration {
        self.interval.max(MIN_REFRESH_INTERVAL)
    }

    /// Page size, never zero.
    pub fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }

    /// Page limit, never zero.
    pub fn effective_max_pages(&self) -> usize {
        self.max_pages.max(1)
    }
}
