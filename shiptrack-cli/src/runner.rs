//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization, and client creation
//! to reduce duplication across command handlers.

use crate::error::CliError;
use shiptrack::config::ConfigFile;
use shiptrack::logging::{init_logging, split_log_path, LoggingGuard};
use shiptrack::refresh::HttpShipmentListing;
use shiptrack::tracking::{HttpTrackingLookup, TrackingLocationCache};
use tracing::info;

/// Options shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunnerOptions {
    /// Force debug-level logging regardless of RUST_LOG
    pub debug: bool,
    /// Mirror log events to stdout
    pub log_stdout: bool,
}

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Load config and initialize logging.
    pub fn new(options: RunnerOptions) -> Result<Self, CliError> {
        // Load config file (or use defaults if not present)
        let config = ConfigFile::load()?;

        let (log_dir, log_file) = split_log_path(&config.logging.file);
        let logging_guard = init_logging(&log_dir, &log_file, options.log_stdout, options.debug)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("shiptrack v{}", shiptrack::VERSION);
        info!(command, "shiptrack CLI command started");
    }

    /// Create a tracking cache backed by the configured tracking API.
    pub fn create_cache(&self) -> Result<TrackingLocationCache<HttpTrackingLookup>, CliError> {
        let tracking = &self.config.tracking;
        let lookup = HttpTrackingLookup::with_timeout(tracking.api_url.clone(), tracking.timeout())?;
        info!(api_url = %tracking.api_url, "Tracking lookup client created");
        Ok(TrackingLocationCache::new(lookup, tracking.into()))
    }

    /// Create a listing client for the configured backend, or `backend_url` if given.
    pub fn create_listing(&self, backend_url: Option<&str>) -> Result<HttpShipmentListing, CliError> {
        let url = backend_url.unwrap_or(&self.config.refresh.backend_url);
        let listing = HttpShipmentListing::new(url)?;
        info!(backend_url = %url, "Shipment backend client created");
        Ok(listing)
    }
}
