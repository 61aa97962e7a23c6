//! Structured logging for Waymark.
//!
//! Every crate logs through `tracing`; this module installs the subscriber
//! that turns those events into output.
//!
//! - route registration and matching decisions at `debug`/`trace`
//! - cache warm, load and clear at `info`
//! - routes skipped during warming at `warn`
//!
//! # Example
//!
//! ```rust,ignore
//! use waymark_telemetry::logging::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::development())?;
//! tracing::info!(cache.path = "bootstrap/cache/routes.json", "warming route cache");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::error::TelemetryError;
use crate::TelemetryResult;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Multi-line, human-readable.
    Pretty,
    /// Single-line, human-readable.
    Compact,
}

impl LogFormat {
    /// Lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
            Self::Compact => "compact",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            other => Err(TelemetryError::InvalidConfig(format!(
                "unknown log format '{other}' (expected json, pretty or compact)"
            ))),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Whether logging is enabled.
    pub enabled: bool,

    /// Filter directive (e.g., "info", "waymark_router=debug").
    pub level: String,

    /// Output format.
    pub format: LogFormat,

    /// Whether to emit ANSI colors (ignored for JSON).
    pub ansi_enabled: bool,

    /// Whether to include file/line info.
    pub file_line_info: bool,

    /// Whether to include thread IDs.
    pub thread_ids: bool,

    /// Whether to include target (module path).
    pub include_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl LogConfig {
    /// Creates a development configuration with human-readable output.
    #[must_use]
    pub fn development() -> Self {
        Self {
            enabled: true,
            level: "debug".to_string(),
            format: LogFormat::Pretty,
            ansi_enabled: true,
            file_line_info: true,
            thread_ids: false,
            include_target: true,
        }
    }

    /// Creates a production configuration with JSON output.
    #[must_use]
    pub fn production() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            format: LogFormat::Json,
            ansi_enabled: false,
            file_line_info: false,
            thread_ids: false,
            include_target: true,
        }
    }
}

/// Initializes the logging subsystem.
///
/// # Errors
///
/// Returns `TelemetryError::LoggingInit` if the filter is invalid or a global
/// subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let filter = create_env_filter(&config.level)?;
    let layer = tracing_subscriber::fmt::layer()
        .with_file(config.file_line_info)
        .with_line_number(config.file_line_info)
        .with_thread_ids(config.thread_ids)
        .with_target(config.include_target);

    let layer = match config.format {
        LogFormat::Json => layer.json().with_filter(filter).boxed(),
        LogFormat::Pretty => layer
            .pretty()
            .with_ansi(config.ansi_enabled)
            .with_filter(filter)
            .boxed(),
        LogFormat::Compact => layer
            .compact()
            .with_ansi(config.ansi_enabled)
            .with_filter(filter)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| TelemetryError::LoggingInit(e.to_string()))
}

/// Creates an env filter from a string.
///
/// # Errors
///
/// Returns error if the filter string is invalid.
pub fn create_env_filter(filter: &str) -> TelemetryResult<EnvFilter> {
    EnvFilter::try_new(filter)
        .map_err(|e| TelemetryError::LoggingInit(format!("Invalid log level: {e}")))
}

/// Standard log fields for Waymark.
///
/// Use these field names for consistency across logs.
pub mod fields {
    /// HTTP method field name.
    pub const HTTP_METHOD: &str = "method";

    /// Path or template field name.
    pub const PATH: &str = "path";

    /// Compiled pattern field name.
    pub const PATTERN: &str = "pattern";

    /// Route name field name.
    pub const ROUTE_NAME: &str = "name";

    /// Handler field name.
    pub const HANDLER: &str = "handler";

    /// Number of routes field name.
    pub const ROUTES: &str = "routes";

    /// Number of cached routes field name.
    pub const CACHED: &str = "cached";

    /// Number of skipped routes field name.
    pub const SKIPPED: &str = "skipped";

    /// Skip reason field name.
    pub const REASON: &str = "reason";
}
