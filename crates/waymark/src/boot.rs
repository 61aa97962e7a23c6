//! Choosing between the live and the cached router at startup.

use tracing::{info, warn};
use waymark_cache::{CacheError, RouteCache};
use waymark_config::WaymarkConfig;
use waymark_router::{Router, RouterResult};
use waymark_telemetry::init_logging;

use crate::app::AppRouter;
use crate::error::WaymarkResult;

/// Installs the logging subscriber described by `config.logging`.
pub fn init_telemetry(config: &WaymarkConfig) -> WaymarkResult<()> {
    init_logging(&config.logging.to_log_config())?;
    Ok(())
}

/// Builds the application router.
///
/// With caching disabled `register` populates a live router. With caching
/// enabled the artifact at `config.cache.path` is loaded instead and
/// `register` is never called, unless the artifact is missing and
/// `config.cache.fallback_to_live` is set.
///
/// # Errors
///
/// Registration errors abort boot. A missing artifact is fatal when fallback
/// is disabled; a corrupt or incompatible one is always fatal.
///
/// # Example
///
/// ```rust
/// use http::Method;
/// use waymark::{boot, Handler, RouteMatcher, WaymarkConfig};
///
/// let app = boot(&WaymarkConfig::development(), |router| {
///     router.get("/users/{id}", Handler::action("UserController", "show"))?;
///     Ok(())
/// })?;
/// assert!(!app.is_cached());
/// assert!(app.match_route(&Method::GET, "/users/3").is_matched());
/// # Ok::<(), waymark::WaymarkError>(())
/// ```
pub fn boot<F>(config: &WaymarkConfig, register: F) -> WaymarkResult<AppRouter>
where
    F: FnOnce(&mut Router) -> RouterResult<()>,
{
    if !config.cache.enabled {
        return live(register);
    }

    let cache = RouteCache::new(&config.cache.path);
    match cache.load() {
        Ok(router) => {
            info!(path = %cache.path().display(), routes = router.len(), "serving cached routes");
            Ok(AppRouter::Cached(router))
        }
        Err(CacheError::NotFound { path }) if config.cache.fallback_to_live => {
            warn!(path = %path.display(), "route cache missing, building live router");
            live(register)
        }
        Err(e) => Err(e.into()),
    }
}

fn live<F>(register: F) -> WaymarkResult<AppRouter>
where
    F: FnOnce(&mut Router) -> RouterResult<()>,
{
    let mut router = Router::new();
    register(&mut router)?;
    info!(routes = router.len(), "serving live routes");
    Ok(AppRouter::Live(router))
}
