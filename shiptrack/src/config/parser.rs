//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use std::path::PathBuf;
use std::str::FromStr;

use ini::{Ini, Properties};

use super::defaults::MAX_JITTER_DEGREES;
use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [tracking] section
    if let Some(section) = ini.section(Some("tracking")) {
        let s = SectionReader::new("tracking", section);
        if let Some(v) = s.url("api_url")? {
            config.tracking.api_url = v;
        }
        if let Some(v) = s.positive("ttl_secs", "must be a positive integer (seconds)")? {
            config.tracking.ttl_secs = v;
        }
        if let Some(v) = s.positive("batch_size", "must be a positive integer")? {
            config.tracking.batch_size = v;
        }
        if let Some(v) = s.number("batch_delay_ms", "must be a non-negative integer (milliseconds)")? {
            config.tracking.batch_delay_ms = v;
        }
        if let Some(v) = s.positive("max_batches_per_trigger", "must be a positive integer")? {
            config.tracking.max_batches_per_trigger = v;
        }
        if let Some(v) = s.positive("timeout_secs", "must be a positive integer (seconds)")? {
            config.tracking.timeout_secs = v;
        }
    }

    // [refresh] section
    if let Some(section) = ini.section(Some("refresh")) {
        let s = SectionReader::new("refresh", section);
        if let Some(v) = s.get("enabled") {
            config.refresh.enabled = parse_bool(v);
        }
        if let Some(v) = s.positive("interval_secs", "must be a positive integer (seconds)")? {
            config.refresh.interval_secs = v;
        }
        if let Some(v) = s.url("backend_url")? {
            config.refresh.backend_url = v;
        }
        if let Some(v) = s.positive("page_size", "must be a positive integer")? {
            config.refresh.page_size = v;
        }
        if let Some(v) = s.positive("max_pages", "must be a positive integer")? {
            config.refresh.max_pages = v;
        }
    }

    // [projection] section
    if let Some(section) = ini.section(Some("projection")) {
        let s = SectionReader::new("projection", section);
        if let Some(v) = s.get("jitter_degrees") {
            config.projection.jitter_degrees = parse_jitter(v).ok_or_else(|| {
                s.invalid("jitter_degrees", v, "must be a number between 0 and 0.15")
            })?;
        }
        if let Some(v) = s.number("seed", "must be a non-negative integer")? {
            config.projection.seed = v;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

/// Typed access to one INI section with uniform error reporting.
struct SectionReader<'a> {
    name: &'static str,
    section: &'a Properties,
}

impl<'a> SectionReader<'a> {
    fn new(name: &'static str, section: &'a Properties) -> Self {
        Self { name, section }
    }

    /// Trimmed value, treating blank as absent.
    fn get(&self, key: &str) -> Option<&'a str> {
        self.section
            .get(key)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    fn number<T: FromStr>(&self, key: &str, reason: &str) -> Result<Option<T>, ConfigFileError> {
        self.get(key)
            .map(|v| v.parse().map_err(|_| self.invalid(key, v, reason)))
            .transpose()
    }

    fn positive<T>(&self, key: &str, reason: &str) -> Result<Option<T>, ConfigFileError>
    where
        T: FromStr + PartialOrd + Default,
    {
        match self.number::<T>(key, reason)? {
            Some(v) if v <= T::default() => Err(self.invalid(key, self.get(key).unwrap_or(""), reason)),
            other => Ok(other),
        }
    }

    fn url(&self, key: &str) -> Result<Option<String>, ConfigFileError> {
        match self.get(key) {
            Some(v) if v.starts_with("http://") || v.starts_with("https://") => {
                Ok(Some(v.trim_end_matches('/').to_string()))
            }
            Some(v) => Err(self.invalid(key, v, "must start with http:// or https://")),
            None => Ok(None),
        }
    }

    fn invalid(&self, key: &str, value: &str, reason: &str) -> ConfigFileError {
        ConfigFileError::InvalidValue {
            section: self.name.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

fn parse_jitter(value: &str) -> Option<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && (0.0..=MAX_JITTER_DEGREES).contains(v))
}

/// Parse a boolean value from a config string.
/// Accepts: true/false, yes/no, 1/0, on/off (case-insensitive)
pub(super) fn parse_bool(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    v == "true" || v == "1" || v == "yes" || v == "on"
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn load(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, content).unwrap();
        ConfigFile::load_from(&config_path)
    }

    #[test]
    fn test_partial_config_overlays_defaults() {
        let config = load(
            r#"
[tracking]
ttl_secs = 600
batch_delay_ms = 0

[refresh]
enabled = no
"#,
        )
        .unwrap();

        let defaults = ConfigFile::default();
        assert_eq!(config.tracking.ttl_secs, 600);
        assert_eq!(config.tracking.batch_delay_ms, 0);
        assert_eq!(config.tracking.batch_size, defaults.tracking.batch_size);
        assert!(!config.refresh.enabled);
        assert_eq!(config.refresh.interval_secs, defaults.refresh.interval_secs);
        assert_eq!(config.projection, defaults.projection);
    }

    #[test]
    fn test_zero_batch_size_is_rejected() {
        let err = load("[tracking]\nbatch_size = 0\n").unwrap_err();
        assert!(err.to_string().contains("tracking.batch_size"));
    }

    #[test]
    fn test_non_numeric_interval_is_rejected() {
        let err = load("[refresh]\ninterval_secs = five minutes\n").unwrap_err();
        match err {
            ConfigFileError::InvalidValue { section, key, value, .. } => {
                assert_eq!(section, "refresh");
                assert_eq!(key, "interval_secs");
                assert_eq!(value, "five minutes");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_jitter_out_of_range_is_rejected() {
        assert!(load("[projection]\njitter_degrees = 0.5\n").is_err());
        assert!(load("[projection]\njitter_degrees = -0.1\n").is_err());

        let config = load("[projection]\njitter_degrees = 0.05\nseed = 7\n").unwrap();
        assert_eq!(config.projection.jitter_degrees, 0.05);
        assert_eq!(config.projection.seed, 7);
    }

    #[test]
    fn test_url_must_be_http() {
        let err = load("[tracking]\napi_url = ftp://tracking.test\n").unwrap_err();
        assert!(err.to_string().contains("http://"));

        let config = load("[refresh]\nbackend_url = https://backend.test/api/\n").unwrap();
        assert_eq!(config.refresh.backend_url, "https://backend.test/api");
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let config = load("[tracking]\napi_url =\nttl_secs =   \n").unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("on"));
        assert!(parse_bool(" 1 "));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("nope"));
    }

    #[test]
    fn test_expand_tilde() {
        let path = expand_tilde("~/logs/shiptrack.log");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(path, home.join("logs/shiptrack.log"));
        }

        let path = expand_tilde("/var/log/shiptrack.log");
        assert_eq!(path, PathBuf::from("/var/log/shiptrack.log"));
    }
}
