//! Router capabilities.
//!
//! Reading (matching, URL generation, introspection) and writing
//! (registration) are separate traits. [`Router`](crate::Router) implements
//! both; [`CachedRouter`](crate::CachedRouter) only implements
//! [`RouteMatcher`], so registering on a cached router does not compile.

use http::Method;

use crate::error::RouterResult;
use crate::handler::Handler;
use crate::route::{Route, RouteId, RouteMatch};
use crate::router::RouteMut;

/// Read side of a router.
pub trait RouteMatcher {
    /// Resolves a method and path to a routing decision.
    fn match_route(&self, method: &Method, path: &str) -> RouteMatch<'_>;

    /// Resolves an HTTP request using its method and URI path.
    fn match_request<B>(&self, request: &http::Request<B>) -> RouteMatch<'_>
    where
        Self: Sized,
    {
        self.match_route(request.method(), request.uri().path())
    }

    /// Generates the URL of a named route.
    ///
    /// Path parameter values are inserted as given, so callers percent-encode
    /// values that contain `/`, spaces or other reserved characters. Leftover
    /// parameters become a form-encoded query string.
    fn url(&self, name: &str, params: &[(&str, &str)]) -> RouterResult<String>;

    /// All routes, in registration order.
    fn routes(&self) -> &[Route];

    /// Looks up a route by name.
    fn named_route(&self, name: &str) -> RouterResult<&Route>;

    /// Returns true if a route is registered under `name`.
    fn has_named_route(&self, name: &str) -> bool {
        self.named_route(name).is_ok()
    }
}

/// Write side of a router.
pub trait RouteRegistry: RouteMatcher {
    /// Compiles `path` and registers it.
    fn add(&mut self, method: Method, path: &str, handler: Handler) -> RouterResult<RouteMut<'_>>;

    /// Records `name` as the reverse-lookup key of `route`.
    fn register_named_route(&mut self, name: &str, route: RouteId) -> RouterResult<()>;
}
