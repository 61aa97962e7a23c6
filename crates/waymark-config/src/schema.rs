//! Configuration schema types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use waymark_telemetry::{LogConfig, LogFormat};

/// Route cache section.
///
/// # Example
///
/// ```
/// use waymark_config::CacheConfig;
///
/// let config = CacheConfig::default();
/// assert!(!config.enabled);
/// assert_eq!(config.path.to_str(), Some("bootstrap/cache/routes.json"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Serve requests from the cached artifact instead of a live router.
    #[serde(default)]
    pub enabled: bool,

    /// Artifact location.
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,

    /// Build a live router when caching is enabled but no artifact exists.
    #[serde(default = "default_fallback_to_live")]
    pub fallback_to_live: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_cache_path(),
            fallback_to_live: default_fallback_to_live(),
        }
    }
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("bootstrap/cache/routes.json")
}

fn default_fallback_to_live() -> bool {
    true
}

/// Logging section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// Filter directive (e.g., "info", "waymark_router=debug").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Emit ANSI colors in human-readable formats.
    #[serde(default)]
    pub ansi_enabled: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            level: default_log_level(),
            format: LogFormat::default(),
            ansi_enabled: false,
        }
    }
}

impl LoggingConfig {
    /// Converts this section into the subscriber settings.
    #[must_use]
    pub fn to_log_config(&self) -> LogConfig {
        let preset = match self.format {
            LogFormat::Json => LogConfig::production(),
            LogFormat::Pretty | LogFormat::Compact => LogConfig::development(),
        };
        LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            format: self.format,
            ansi_enabled: self.ansi_enabled,
            ..preset
        }
    }
}

fn default_logging_enabled() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
