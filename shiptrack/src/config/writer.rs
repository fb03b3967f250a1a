//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! Produces the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let tracking = &config.tracking;
    let refresh = &config.refresh;
    let projection = &config.projection;

    format!(
        r#"[tracking]
; Base URL of the carrier tracking API; lookups call <api_url>/<tracking code>
api_url = {}
; How long a looked-up location stays fresh, in seconds (default: 3600)
ttl_secs = {}
; Lookups issued concurrently per batch (default: 10)
batch_size = {}
; Pause between batches in milliseconds (default: 500)
batch_delay_ms = {}
; Batches one trigger may run; remaining codes wait for the next trigger (default: 3)
max_batches_per_trigger = {}
; HTTP timeout per lookup in seconds (default: 10)
timeout_secs = {}

[refresh]
; Periodically refresh in-transit shipments from the backend (default: true)
enabled = {}
; Refresh period in seconds (default: 300)
interval_secs = {}
; Base URL of the shipment backend; listings call <backend_url>/shipments
backend_url = {}
; Records requested per page (default: 50)
page_size = {}
; Maximum pages fetched per refresh (default: 10)
max_pages = {}

[projection]
; Maximum marker offset per axis in degrees, 0 to 0.15 (default: 0.15)
; Keeps shipments in the same city from stacking on one spot
jitter_degrees = {}
; Seed for marker offsets; change it to reshuffle positions (default: 0)
seed = {}

[logging]
; Log file path (default: ~/.shiptrack/shiptrack.log)
file = {}
"#,
        tracking.api_url,
        tracking.ttl_secs,
        tracking.batch_size,
        tracking.batch_delay_ms,
        tracking.max_batches_per_trigger,
        tracking.timeout_secs,
        refresh.enabled,
        refresh.interval_secs,
        refresh.backend_url,
        refresh.page_size,
        refresh.max_pages,
        projection.jitter_degrees,
        projection.seed,
        path_to_string(&config.logging.file),
    )
}

/// Render a path, collapsing the home directory back to `~`.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
