//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file. The
//! `From` impls at the bottom turn file settings into the runtime configs
//! the components take.

use std::path::PathBuf;
use std::time::Duration;

use crate::projector::ProjectorConfig;
use crate::refresh::AutoRefreshConfig;
use crate::tracking::TrackingCacheConfig;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Tracking lookup and cache settings
    pub tracking: TrackingSettings,
    /// Auto-refresh settings
    pub refresh: RefreshSettings,
    /// Marker projection settings
    pub projection: ProjectionSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Tracking lookup and cache configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingSettings {
    /// Base URL of the tracking API
    pub api_url: String,
    /// Entry time-to-live in seconds
    pub ttl_secs: u64,
    /// Lookups per batch
    pub batch_size: usize,
    /// Pause between batches in milliseconds
    pub batch_delay_ms: u64,
    /// Batches one trigger may run
    pub max_batches_per_trigger: usize,
    /// HTTP timeout per lookup in seconds
    pub timeout_secs: u64,
}

/// Auto-refresh configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshSettings {
    /// Arm the refresh timer on start
    pub enabled: bool,
    /// Refresh period in seconds
    pub interval_secs: u64,
    /// Base URL of the shipment backend
    pub backend_url: String,
    /// Records per listing page
    pub page_size: usize,
    /// Maximum pages per refresh
    pub max_pages: usize,
}

/// Marker projection configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionSettings {
    /// Maximum marker offset per axis in degrees
    pub jitter_degrees: f64,
    /// Seed mixed into every jitter draw
    pub seed: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}

impl TrackingSettings {
    /// HTTP timeout per lookup.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl From<&TrackingSettings> for TrackingCacheConfig {
    fn from(settings: &TrackingSettings) -> Self {
        Self {
            ttl: Duration::from_secs(settings.ttl_secs),
            batch_size: settings.batch_size,
            batch_delay: Duration::from_millis(settings.batch_delay_ms),
            max_batches_per_trigger: settings.max_batches_per_trigger,
        }
    }
}

impl From<&RefreshSettings> for AutoRefreshConfig {
    fn from(settings: &RefreshSettings) -> Self {
        Self {
            enabled: settings.enabled,
            interval: Duration::from_secs(settings.interval_secs),
            page_size: settings.page_size,
            max_pages: settings.max_pages,
        }
    }
}

impl From<&ProjectionSettings> for ProjectorConfig {
    fn from(settings: &ProjectionSettings) -> Self {
        Self {
            jitter_degrees: settings.jitter_degrees,
            seed: settings.seed,
        }
    }
}
