//! Configuration management for loadlist
//!
//! ```toml
//! [fetch]
//! delay = "2s"
//! # fail_with = "repository unavailable"
//!
//! [store]
//! event_capacity = 100
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

pub const CONFIG_ENV: &str = "LOADLIST_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// How long the item repository takes to answer
    #[serde(with = "humantime_duration", default = "default_fetch_delay")]
    pub delay: Duration,

    /// When set, every fetch fails with this description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_with: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// State changes buffered per subscriber before a lagging one skips ahead
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_fetch_delay() -> Duration {
    Duration::from_secs(2)
}

fn default_event_capacity() -> usize {
    100
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            delay: default_fetch_delay(),
            fail_with: None,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            event_capacity: default_event_capacity(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// Falls back to defaults when no file exists there.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "No config file; using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the store cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.store.event_capacity == 0 {
            return Err(
                ConfigError::InvalidValue("store.event_capacity must be > 0".to_string()).into(),
            );
        }
        Ok(())
    }
}

/// Resolve the configuration file path following the XDG base directory layout
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("loadlist").join("config.toml"))
}

mod humantime_duration {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&humantime::format_duration(*value).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.fetch.delay, Duration::from_secs(2));
        assert!(config.fetch.fail_with.is_none());
        assert_eq!(config.store.event_capacity, 100);
    }

    #[test]
    fn test_load_from_path() {
        let file = write_config(
            r#"
[fetch]
delay = "250ms"
fail_with = "repository unavailable"

[store]
event_capacity = 8
"#,
        );

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.fetch.delay, Duration::from_millis(250));
        assert_eq!(
            config.fetch.fail_with.as_deref(),
            Some("repository unavailable")
        );
        assert_eq!(config.store.event_capacity, 8);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let file = write_config("[fetch]\ndelay = \"1s\"\n");
        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.fetch.delay, Duration::from_secs(1));
        assert_eq!(config.store, StoreConfig::default());
    }

    #[test]
    fn test_invalid_duration_is_parse_error() {
        let file = write_config("[fetch]\ndelay = \"soon\"\n");
        let err = Config::load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let file = write_config("[store]\nevent_capacity = 0\n");
        let err = Config::load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("event_capacity"));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Config::load_from_path(Path::new("/nonexistent/loadlist.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = Config {
            fetch: FetchConfig {
                delay: Duration::from_millis(1500),
                fail_with: None,
            },
            store: StoreConfig::default(),
        };
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("delay = \"1s 500ms\""));
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    #[serial]
    fn test_env_override_path() {
        let file = write_config("[fetch]\ndelay = \"3s\"\n");
        std::env::set_var(CONFIG_ENV, file.path());
        let resolved = resolve_config_path();
        let loaded = Config::load();
        std::env::remove_var(CONFIG_ENV);

        assert_eq!(resolved.unwrap(), file.path().to_path_buf());
        assert_eq!(loaded.unwrap().fetch.delay, Duration::from_secs(3));
    }

    #[test]
    #[serial]
    fn test_load_defaults_when_file_absent() {
        std::env::set_var(CONFIG_ENV, "/nonexistent/loadlist/config.toml");
        let loaded = Config::load();
        std::env::remove_var(CONFIG_ENV);

        assert_eq!(loaded.unwrap(), Config::default());
    }
}
