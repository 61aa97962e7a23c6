//! Top-level error type.

use thiserror::Error;
use waymark_cache::CacheError;
use waymark_config::ConfigError;
use waymark_router::RouterError;
use waymark_telemetry::TelemetryError;

/// Result type for facade operations.
pub type WaymarkResult<T> = Result<T, WaymarkError>;

/// Any error a Waymark application can hit while booting or running commands.
#[derive(Debug, Error)]
pub enum WaymarkError {
    /// Route registration, naming or URL generation failed.
    #[error(transparent)]
    Router(#[from] RouterError),

    /// The route cache could not be written, read or cleared.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Logging could not be initialized.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_router_error() {
        let err = WaymarkError::from(RouterError::ReadOnly);
        assert_eq!(err.to_string(), "cannot mutate a cached router");
        assert!(matches!(err, WaymarkError::Router(RouterError::ReadOnly)));
    }

    #[test]
    fn test_wraps_cache_error() {
        let err = WaymarkError::from(CacheError::not_found("routes.json"));
        assert!(matches!(err, WaymarkError::Cache(ref e) if e.is_not_found()));
    }
}
