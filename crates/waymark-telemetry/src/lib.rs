//! Logging setup for Waymark.
//!
//! The router and cache crates emit `tracing` events; this crate installs a
//! `tracing-subscriber` registry with an `EnvFilter` and a JSON, pretty or
//! compact formatter.
//!
//! # Example
//!
//! ```rust,ignore
//! use waymark_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::production())?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, fields, init_logging, LogConfig, LogFormat};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
