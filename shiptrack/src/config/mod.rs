//! User configuration.
//!
//! Settings are read from `~/.shiptrack/config.ini` and overlaid on
//! defaults; a missing file means "all defaults". Each section maps to one
//! settings struct, and each settings struct converts into the runtime
//! config of the component it tunes:
//!
//! | Section        | Settings             | Runtime config          |
//! |----------------|----------------------|-------------------------|
//! | `[tracking]`   | `TrackingSettings`   | `TrackingCacheConfig`   |
//! | `[refresh]`    | `RefreshSettings`    | `AutoRefreshConfig`     |
//! | `[projection]` | `ProjectionSettings` | `ProjectorConfig`       |
//! | `[logging]`    | `LoggingSettings`    | -                       |
//!
//! # Example
//!
//! ```
//! use shiptrack::config::ConfigFile;
//! use shiptrack::tracking::TrackingCacheConfig;
//!
//! let config = ConfigFile::default();
//! let cache_config = TrackingCacheConfig::from(&config.tracking);
//! assert_eq!(cache_config.batch_size, 10);
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{DEFAULT_LOG_FILE_NAME, MAX_JITTER_DEGREES};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    ConfigFile, LoggingSettings, ProjectionSettings, RefreshSettings, TrackingSettings,
};
