//! Typed configuration for Waymark.
//!
//! - TOML and JSON configuration files
//! - Environment variable overrides (`WAYMARK__SECTION__KEY`)
//! - `.env` files
//! - Strict parsing that fails on unknown fields
//!
//! # Configuration File Format
//!
//! ```toml
//! [cache]
//! enabled = true
//! path = "bootstrap/cache/routes.json"
//! fallback_to_live = false
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"
//! ansi_enabled = false
//! ```
//!
//! # Environment Variable Overrides
//!
//! - `WAYMARK__CACHE__ENABLED=true`
//! - `WAYMARK__CACHE__PATH=/var/cache/routes.json`
//! - `WAYMARK__CACHE__FALLBACK_TO_LIVE=false`
//! - `WAYMARK__LOGGING__LEVEL=waymark_router=debug`
//! - `WAYMARK__LOGGING__FORMAT=pretty`

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::WaymarkConfig;
pub use error::ConfigError;
pub use loader::{ConfigLoader, DEFAULT_ENV_PREFIX};
pub use schema::{CacheConfig, LoggingConfig};
pub use waymark_telemetry::LogFormat;
