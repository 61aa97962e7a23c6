//! # Waymark
//!
//! HTTP routing for applications that register routes once and serve them
//! many times.
//!
//! - [`router`]: path-template compilation, two-tier matching, reverse URLs
//! - [`cache`]: freezing a router into an artifact and loading it back
//! - [`config`]: typed configuration with file and environment layers
//! - [`telemetry`]: logging setup
//!
//! # Quick Start
//!
//! ```rust
//! use http::Method;
//! use waymark::prelude::*;
//!
//! let app = boot(&WaymarkConfig::development(), |router| {
//!     router.get("/", Handler::class("HomeController"))?;
//!     router
//!         .get("/users/{id}", Handler::action("UserController", "show"))?
//!         .name("users.show")?;
//!     Ok(())
//! })?;
//!
//! let m = app.match_route(&Method::GET, "/users/42");
//! assert_eq!(m.param("id"), Some("42"));
//! assert_eq!(app.url("users.show", &[("id", "5")])?, "/users/5");
//! # Ok::<(), WaymarkError>(())
//! ```
//!
//! # Deploying with a route cache
//!
//! 1. A build step registers every route and runs [`commands::warm`].
//! 2. Production starts with `cache.enabled = true`; [`boot`] loads a
//!    [`CachedRouter`](router::CachedRouter) and skips registration entirely.
//! 3. [`commands::clear`] removes the artifact.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;
mod boot;
pub mod commands;
mod error;

pub use waymark_cache as cache;
pub use waymark_config as config;
pub use waymark_router as router;
pub use waymark_telemetry as telemetry;

pub use app::AppRouter;
pub use boot::{boot, init_telemetry};
pub use error::{WaymarkError, WaymarkResult};

pub use waymark_config::WaymarkConfig;
pub use waymark_router::{Handler, RouteMatcher, RouteRegistry, Router};

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use waymark::prelude::*;
/// ```
pub mod prelude {
    pub use crate::app::AppRouter;
    pub use crate::boot::{boot, init_telemetry};
    pub use crate::commands::CommandOutcome;
    pub use crate::error::{WaymarkError, WaymarkResult};

    pub use waymark_cache::{RouteCache, WarmReport};
    pub use waymark_config::{ConfigLoader, WaymarkConfig};
    pub use waymark_router::{
        CachedRouter, Handler, Params, Route, RouteMatch, RouteMatcher, RouteRegistry, Router,
        RouterError,
    };
}
