//! Default values for all configuration settings.
//!
//! Component defaults live next to the components; this module only
//! assembles them into `ConfigFile::default()`.

use super::file::config_directory;
use super::settings::*;
use crate::refresh::{
    DEFAULT_BACKEND_URL, DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE, DEFAULT_REFRESH_INTERVAL_SECS,
};
use crate::route::DEFAULT_JITTER_DEGREES;
use crate::tracking::{
    DEFAULT_BATCH_DELAY_MS, DEFAULT_BATCH_SIZE, DEFAULT_LOOKUP_TIMEOUT_SECS,
    DEFAULT_MAX_BATCHES_PER_TRIGGER, DEFAULT_TRACKING_API_URL, DEFAULT_TTL_SECS,
};

/// Default log file name inside the config directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "shiptrack.log";

/// Upper bound accepted for `[projection] jitter_degrees`.
pub const MAX_JITTER_DEGREES: f64 = 0.15;

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            tracking: TrackingSettings {
                api_url: DEFAULT_TRACKING_API_URL.to_string(),
                ttl_secs: DEFAULT_TTL_SECS,
                batch_size: DEFAULT_BATCH_SIZE,
                batch_delay_ms: DEFAULT_BATCH_DELAY_MS,
                max_batches_per_trigger: DEFAULT_MAX_BATCHES_PER_TRIGGER,
                timeout_secs: DEFAULT_LOOKUP_TIMEOUT_SECS,
            },
            refresh: RefreshSettings {
                enabled: true,
                interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
                backend_url: DEFAULT_BACKEND_URL.to_string(),
                page_size: DEFAULT_PAGE_SIZE,
                max_pages: DEFAULT_MAX_PAGES,
            },
            projection: ProjectionSettings {
                jitter_degrees: DEFAULT_JITTER_DEGREES,
                seed: 0,
            },
            logging: LoggingSettings {
                file: config_directory().join(DEFAULT_LOG_FILE_NAME),
            },
        }
    }
}
