//! The application's router, live or cached.

use http::Method;
use waymark_router::{
    CachedRouter, Route, RouteMatch, RouteMatcher, Router, RouterError, RouterResult,
};

/// The router an application serves requests from.
///
/// Development processes register routes on a [`Router`]; production
/// processes load a [`CachedRouter`]. Both answer the same questions.
#[derive(Debug, Clone)]
pub enum AppRouter {
    /// Routes registered in this process.
    Live(Router),
    /// Routes restored from the cache artifact.
    Cached(CachedRouter),
}

impl AppRouter {
    /// Returns true if serving from the cache artifact.
    pub fn is_cached(&self) -> bool {
        matches!(self, Self::Cached(_))
    }

    /// The live router, for registering more routes.
    ///
    /// # Errors
    ///
    /// Returns `RouterError::ReadOnly` for a cached router.
    pub fn registry(&mut self) -> RouterResult<&mut Router> {
        match self {
            Self::Live(router) => Ok(router),
            Self::Cached(_) => Err(RouterError::ReadOnly),
        }
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes().len()
    }

    /// Returns true if no routes are available.
    pub fn is_empty(&self) -> bool {
        self.routes().is_empty()
    }
}

impl From<Router> for AppRouter {
    fn from(router: Router) -> Self {
        Self::Live(router)
    }
}

impl From<CachedRouter> for AppRouter {
    fn from(router: CachedRouter) -> Self {
        Self::Cached(router)
    }
}

impl RouteMatcher for AppRouter {
    fn match_route(&self, method: &Method, path: &str) -> RouteMatch<'_> {
        match self {
            Self::Live(router) => router.match_route(method, path),
            Self::Cached(router) => router.match_route(method, path),
        }
    }

    fn url(&self, name: &str, params: &[(&str, &str)]) -> RouterResult<String> {
        match self {
            Self::Live(router) => router.url(name, params),
            Self::Cached(router) => router.url(name, params),
        }
    }

    fn routes(&self) -> &[Route] {
        match self {
            Self::Live(router) => router.routes(),
            Self::Cached(router) => router.routes(),
        }
    }

    fn named_route(&self, name: &str) -> RouterResult<&Route> {
        match self {
            Self::Live(router) => router.named_route(name),
            Self::Cached(router) => router.named_route(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waymark_router::{CacheArtifact, Handler};

    #[test]
    fn test_live_registry() {
        let mut app = AppRouter::from(Router::new());
        app.registry()
            .unwrap()
            .get("/users/{id}", Handler::class("Show"))
            .unwrap();

        assert!(!app.is_cached());
        assert_eq!(app.len(), 1);
        assert_eq!(
            app.match_route(&Method::GET, "/users/1").param("id"),
            Some("1")
        );
    }

    #[test]
    fn test_cached_registry_is_read_only() {
        let cached = CachedRouter::from_artifact(CacheArtifact::default()).unwrap();
        let mut app = AppRouter::from(cached);

        assert!(app.is_cached());
        assert!(app.is_empty());
        assert_eq!(app.registry().unwrap_err(), RouterError::ReadOnly);
    }
}
