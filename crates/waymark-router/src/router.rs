//! The mutable route registry.
//!
//! [`Router`] compiles templates as they are registered, buckets them (static
//! or dynamic-by-segment-count) and owns the name → route index.

use http::Method;
use indexmap::IndexMap;
use tracing::debug;

use crate::compiler::PathCompiler;
use crate::error::{RouterError, RouterResult};
use crate::handler::{Handler, Middleware};
use crate::matcher::{RouteMatcher, RouteRegistry};
use crate::reverse;
use crate::route::{Route, RouteId, RouteMatch};
use crate::table::RouteTable;

/// A route registry backed by a two-tier static/dynamic table.
///
/// # Example
///
/// ```rust
/// use waymark_router::{Handler, RouteMatcher, Router};
/// use http::Method;
///
/// let mut router = Router::new();
/// router.get("/", Handler::class("HomeController"))?;
/// router
///     .get("/users/{id}", Handler::action("UserController", "show"))?
///     .name("users.show")?;
///
/// let m = router.match_route(&Method::GET, "/users/42");
/// assert!(m.is_matched());
/// assert_eq!(m.param("id"), Some("42"));
///
/// assert_eq!(router.url("users.show", &[("id", "5")])?, "/users/5");
/// # Ok::<(), waymark_router::RouterError>(())
/// ```
///
/// # Matching order
///
/// 1. **Static routes** (e.g. `/users/me`) are an exact hash lookup and win
///    over any dynamic route of the same shape, whatever the registration
///    order.
/// 2. **Dynamic routes** with the request's segment count are tried in
///    registration order; the first match wins.
/// 3. **Other dynamic buckets** for the method are tried next, which is how
///    `/posts/{id?}` also matches `/posts`.
#[derive(Debug, Clone, Default)]
pub struct Router {
    table: RouteTable,
    named: IndexMap<String, RouteId>,
}

impl Router {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles `path` and registers it for `method`.
    ///
    /// Returns a [`RouteMut`] for naming the route and attaching middleware.
    pub fn add(&mut self, method: Method, path: &str, handler: Handler) -> RouterResult<RouteMut<'_>> {
        let compiled = PathCompiler::compile(path)?;

        if self.table.contains(&method, &compiled.template) {
            return Err(RouterError::DuplicateRoute {
                method: method.to_string(),
                path: compiled.template,
            });
        }

        debug!(
            %method,
            path = %compiled.template,
            pattern = %compiled.pattern,
            segments = compiled.segment_count,
            dynamic = !compiled.is_static(),
            handler = %handler,
            "route registered"
        );

        let id = self.table.push(Route::new(method, compiled, handler));
        Ok(RouteMut { router: self, id })
    }

    /// Registers a GET route.
    pub fn get(&mut self, path: &str, handler: Handler) -> RouterResult<RouteMut<'_>> {
        self.add(Method::GET, path, handler)
    }

    /// Registers a POST route.
    pub fn post(&mut self, path: &str, handler: Handler) -> RouterResult<RouteMut<'_>> {
        self.add(Method::POST, path, handler)
    }

    /// Registers a PUT route.
    pub fn put(&mut self, path: &str, handler: Handler) -> RouterResult<RouteMut<'_>> {
        self.add(Method::PUT, path, handler)
    }

    /// Registers a PATCH route.
    pub fn patch(&mut self, path: &str, handler: Handler) -> RouterResult<RouteMut<'_>> {
        self.add(Method::PATCH, path, handler)
    }

    /// Registers a DELETE route.
    pub fn delete(&mut self, path: &str, handler: Handler) -> RouterResult<RouteMut<'_>> {
        self.add(Method::DELETE, path, handler)
    }

    /// Registers a HEAD route.
    pub fn head(&mut self, path: &str, handler: Handler) -> RouterResult<RouteMut<'_>> {
        self.add(Method::HEAD, path, handler)
    }

    /// Registers an OPTIONS route.
    pub fn options(&mut self, path: &str, handler: Handler) -> RouterResult<RouteMut<'_>> {
        self.add(Method::OPTIONS, path, handler)
    }

    /// Records `name` as the reverse-lookup key of `route`.
    ///
    /// Names are unique: a name already held by another route is rejected,
    /// and a route keeps the first name it is given.
    pub fn register_named_route(&mut self, name: &str, route: RouteId) -> RouterResult<()> {
        if let Some(existing) = self.named.get(name) {
            if *existing == route {
                return Ok(());
            }
            return Err(RouterError::DuplicateRouteName {
                name: name.to_string(),
            });
        }

        let entry = self
            .table
            .get_mut(route)
            .ok_or(RouterError::UnknownRoute(route.index()))?;
        entry.assign_name(name)?;

        debug!(name, method = %entry.method(), path = entry.path(), "route named");
        self.named.insert(name.to_string(), route);
        Ok(())
    }

    /// Returns the route with the given id.
    pub fn route(&self, id: RouteId) -> Option<&Route> {
        self.table.get(id)
    }

    /// Iterates over named routes in naming order.
    pub fn named_routes(&self) -> impl Iterator<Item = (&str, &Route)> {
        self.named
            .iter()
            .filter_map(|(name, id)| self.table.get(*id).map(|route| (name.as_str(), route)))
    }

    /// Iterates over the static bucket as `(method, literal path, id)`.
    pub fn static_entries(&self) -> impl Iterator<Item = (&Method, &str, RouteId)> {
        self.table.static_buckets().iter().flat_map(|(method, bucket)| {
            bucket
                .iter()
                .map(move |(path, id)| (method, path.as_str(), *id))
        })
    }

    /// Iterates over the dynamic buckets as `(method, segment count, ids)`.
    pub fn dynamic_entries(&self) -> impl Iterator<Item = (&Method, usize, &[RouteId])> {
        self.table
            .dynamic_buckets()
            .iter()
            .flat_map(|(method, buckets)| {
                buckets
                    .iter()
                    .map(move |(count, ids)| (method, *count, ids.as_slice()))
            })
    }

    /// Returns the number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.routes().len()
    }

    /// Returns true if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.routes().is_empty()
    }
}

impl RouteMatcher for Router {
    fn match_route(&self, method: &Method, path: &str) -> RouteMatch<'_> {
        self.table.lookup(method, path)
    }

    fn url(&self, name: &str, params: &[(&str, &str)]) -> RouterResult<String> {
        let route = self.named_route(name)?;
        reverse::generate(name, route.path(), params)
    }

    fn routes(&self) -> &[Route] {
        self.table.routes()
    }

    fn named_route(&self, name: &str) -> RouterResult<&Route> {
        self.named
            .get(name)
            .and_then(|id| self.table.get(*id))
            .ok_or_else(|| RouterError::unknown_named_route(name))
    }
}

impl RouteRegistry for Router {
    fn add(&mut self, method: Method, path: &str, handler: Handler) -> RouterResult<RouteMut<'_>> {
        Router::add(self, method, path, handler)
    }

    fn register_named_route(&mut self, name: &str, route: RouteId) -> RouterResult<()> {
        Router::register_named_route(self, name, route)
    }
}

/// Fluent access to a route that was just registered.
#[derive(Debug)]
pub struct RouteMut<'a> {
    router: &'a mut Router,
    id: RouteId,
}

impl RouteMut<'_> {
    /// Names the route for reverse lookup.
    pub fn name(self, name: &str) -> RouterResult<Self> {
        self.router.register_named_route(name, self.id)?;
        Ok(self)
    }

    /// Appends middleware; the dispatcher runs it in the order added.
    pub fn middleware(self, middleware: Middleware) -> Self {
        if let Some(route) = self.router.table.get_mut(self.id) {
            route.push_middleware(middleware);
        }
        self
    }

    /// The route's id.
    pub fn id(&self) -> RouteId {
        self.id
    }

    /// The route as registered so far.
    pub fn route(&self) -> Option<&Route> {
        self.router.table.get(self.id)
    }
}
