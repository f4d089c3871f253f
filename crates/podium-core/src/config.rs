//! Configuration loading and typed config structures.
//!
//! The canonical configuration lives in `podium.yaml` next to the
//! binary. This module defines strongly-typed structs mirroring the
//! YAML structure; every field has a default so a partial (or absent)
//! file still yields a usable configuration.

use std::path::Path;

use podium_types::Speaker;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Mobile sync (HTTP poll endpoint) settings.
    #[serde(default)]
    pub sync: SyncConfig,

    /// Countdown settings.
    #[serde(default)]
    pub timer: TimerConfig,

    /// The initial speaker roster, in running order.
    #[serde(default)]
    pub speakers: Vec<Speaker>,
}

impl AppConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yml::from_str(&contents)?)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Settings for the HTTP poll endpoint serving mobile devices on the
/// local network.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SyncConfig {
    /// Whether to run the poll endpoint at all.
    #[serde(default = "default_sync_enabled")]
    pub enabled: bool,

    /// Host address to bind to.
    #[serde(default = "default_sync_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_sync_port")]
    pub port: u16,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: default_sync_enabled(),
            host: default_sync_host(),
            port: default_sync_port(),
        }
    }
}

/// Countdown settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimerConfig {
    /// Remaining-time threshold (seconds) at or below which the
    /// warning state is raised.
    #[serde(default = "default_warning_threshold")]
    pub warning_threshold_seconds: i64,

    /// Tick interval in milliseconds. One second is the intended live
    /// cadence; smaller values are for rehearsal fast-forward.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            warning_threshold_seconds: default_warning_threshold(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

const fn default_sync_enabled() -> bool {
    true
}

fn default_sync_host() -> String {
    String::from("0.0.0.0")
}

const fn default_sync_port() -> u16 {
    8000
}

const fn default_warning_threshold() -> i64 {
    60
}

const fn default_tick_interval_ms() -> u64 {
    1000
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_live_event_setup() {
        let config = AppConfig::default();
        assert!(config.sync.enabled);
        assert_eq!(config.sync.host, "0.0.0.0");
        assert_eq!(config.sync.port, 8000);
        assert_eq!(config.timer.warning_threshold_seconds, 60);
        assert_eq!(config.timer.tick_interval_ms, 1000);
        assert!(config.speakers.is_empty());
    }

    #[test]
    fn empty_yaml_yields_defaults() {
        let config = AppConfig::parse("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_yaml_overrides_only_named_fields() {
        let config = AppConfig::parse(
            r"
sync:
  port: 9090
timer:
  warning_threshold_seconds: 120
",
        )
        .unwrap();
        assert_eq!(config.sync.port, 9090);
        assert_eq!(config.sync.host, "0.0.0.0");
        assert_eq!(config.timer.warning_threshold_seconds, 120);
        assert_eq!(config.timer.tick_interval_ms, 1000);
    }

    #[test]
    fn speakers_parse_in_running_order() {
        let config = AppConfig::parse(
            r#"
speakers:
  - name: "Ada"
    segment: "Opening"
    minutes: 5
  - name: "Grace"
    segment: "Keynote"
    minutes: 20
    seconds: 30
"#,
        )
        .unwrap();
        assert_eq!(config.speakers.len(), 2);
        let grace = config.speakers.get(1).unwrap();
        assert_eq!(grace.name, "Grace");
        assert_eq!(grace.allocated_seconds(), 1230);
    }

    #[test]
    fn invalid_yaml_is_rejected() {
        let result = AppConfig::parse("timer: [not, a, map]");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }
}
