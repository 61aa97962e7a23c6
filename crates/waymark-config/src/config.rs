//! Main configuration type.

use serde::{Deserialize, Serialize};
use waymark_telemetry::{create_env_filter, LogFormat};

use crate::{CacheConfig, ConfigError, LoggingConfig};

/// Complete Waymark configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load configuration from files
/// and environment variables.
///
/// # Example
///
/// ```
/// use waymark_config::WaymarkConfig;
///
/// let config = WaymarkConfig::default();
/// assert!(!config.cache.enabled);
/// assert_eq!(config.logging.level, "info");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct WaymarkConfig {
    /// Route cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl WaymarkConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - the cache is enabled with an empty path
    /// - the log level is not a valid filter directive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache.enabled && self.cache.path.as_os_str().is_empty() {
            return Err(ConfigError::invalid_value(
                "cache.path",
                "must not be empty when the cache is enabled",
            ));
        }

        if self.logging.enabled {
            create_env_filter(&self.logging.level)
                .map_err(|e| ConfigError::invalid_value("logging.level", e.to_string()))?;
        }

        Ok(())
    }

    /// Local development preset: live router, pretty debug logs.
    ///
    /// # Example
    ///
    /// ```
    /// use waymark_config::WaymarkConfig;
    ///
    /// let config = WaymarkConfig::development();
    /// assert!(!config.cache.enabled);
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn development() -> Self {
        Self {
            cache: CacheConfig {
                enabled: false,
                ..CacheConfig::default()
            },
            logging: LoggingConfig {
                enabled: true,
                level: "debug".to_string(),
                format: LogFormat::Pretty,
                ansi_enabled: true,
            },
        }
    }

    /// Production preset: cached router required, JSON info logs.
    ///
    /// # Example
    ///
    /// ```
    /// use waymark_config::WaymarkConfig;
    ///
    /// let config = WaymarkConfig::production();
    /// assert!(config.cache.enabled);
    /// assert!(!config.cache.fallback_to_live);
    /// ```
    #[must_use]
    pub fn production() -> Self {
        Self {
            cache: CacheConfig {
                enabled: true,
                fallback_to_live: false,
                ..CacheConfig::default()
            },
            logging: LoggingConfig {
                enabled: true,
                level: "info".to_string(),
                format: LogFormat::Json,
                ansi_enabled: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_validates() {
        assert!(WaymarkConfig::default().validate().is_ok());
        assert!(WaymarkConfig::development().validate().is_ok());
        assert!(WaymarkConfig::production().validate().is_ok());
    }

    #[test]
    fn test_empty_cache_path_rejected() {
        let mut config = WaymarkConfig::production();
        config.cache.path = PathBuf::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "cache.path"
        ));
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let mut config = WaymarkConfig::default();
        config.logging.level = "waymark=[".to_string();
        assert!(config.validate().is_err());

        config.logging.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_toml() {
        let toml = r#"
            [cache]
            enabled = true
            path = "var/routes.json"
            fallback_to_live = false

            [logging]
            level = "warn"
            format = "compact"
            ansi_enabled = true
        "#;
        let config: WaymarkConfig = toml::from_str(toml).unwrap();
        assert!(config.cache.enabled);
        assert_eq!(config.cache.path, PathBuf::from("var/routes.json"));
        assert!(!config.cache.fallback_to_live);
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert!(config.logging.ansi_enabled);
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result: Result<WaymarkConfig, _> = toml::from_str("[server]\nport = 1");
        assert!(result.is_err());
    }
}
