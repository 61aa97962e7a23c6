//! Two-tier route table.
//!
//! Zero-parameter routes live in a per-method hash keyed by their literal
//! path. Everything else is bucketed per method by segment count and scanned
//! in registration order. The live and the cached router both match through
//! this table, so they cannot drift apart.

use http::Method;
use indexmap::IndexMap;
use tracing::trace;

use crate::params::Params;
use crate::route::{Route, RouteId, RouteMatch};
use crate::template::{normalize_path, segment_count};

/// Static routes: method → literal path → route.
pub(crate) type StaticBuckets = IndexMap<Method, IndexMap<String, RouteId>>;

/// Dynamic routes: method → segment count → routes in registration order.
pub(crate) type DynamicBuckets = IndexMap<Method, IndexMap<usize, Vec<RouteId>>>;

#[derive(Debug, Clone, Default)]
pub(crate) struct RouteTable {
    routes: Vec<Route>,
    static_routes: StaticBuckets,
    dynamic_routes: DynamicBuckets,
}

impl RouteTable {
    /// Adds a route to the bucket its path shape selects.
    pub(crate) fn push(&mut self, route: Route) -> RouteId {
        let id = RouteId(self.routes.len());

        if route.is_static() {
            self.static_routes
                .entry(route.method().clone())
                .or_default()
                .insert(route.path().to_string(), id);
        } else {
            self.dynamic_routes
                .entry(route.method().clone())
                .or_default()
                .entry(route.segment_count())
                .or_default()
                .push(id);
        }

        self.routes.push(route);
        id
    }

    pub(crate) fn contains(&self, method: &Method, path: &str) -> bool {
        self.routes
            .iter()
            .any(|r| r.method() == method && r.path() == path)
    }

    pub(crate) fn get(&self, id: RouteId) -> Option<&Route> {
        self.routes.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: RouteId) -> Option<&mut Route> {
        self.routes.get_mut(id.0)
    }

    pub(crate) fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub(crate) fn static_buckets(&self) -> &StaticBuckets {
        &self.static_routes
    }

    pub(crate) fn dynamic_buckets(&self) -> &DynamicBuckets {
        &self.dynamic_routes
    }

    /// Resolves a request.
    ///
    /// 1. exact static lookup (always wins over a dynamic route of the same shape)
    /// 2. dynamic bucket with the path's segment count, first match wins
    /// 3. every other dynamic bucket for the method, for optional parameters
    ///    that shift the segment count
    pub(crate) fn lookup(&self, method: &Method, path: &str) -> RouteMatch<'_> {
        let path = normalize_path(path);

        if let Some(id) = self
            .static_routes
            .get(method)
            .and_then(|bucket| bucket.get(path.as_ref()))
        {
            trace!(%method, path = %path, "static route hit");
            return RouteMatch::found(&self.routes[id.0], Params::new());
        }

        let Some(buckets) = self.dynamic_routes.get(method) else {
            return RouteMatch::not_found();
        };

        let count = segment_count(&path);
        if let Some(found) = buckets.get(&count).and_then(|ids| self.scan(ids, &path)) {
            return found;
        }

        buckets
            .iter()
            .filter(|(bucket, _)| **bucket != count)
            .find_map(|(_, ids)| self.scan(ids, &path))
            .unwrap_or_else(RouteMatch::not_found)
    }

    fn scan(&self, ids: &[RouteId], path: &str) -> Option<RouteMatch<'_>> {
        ids.iter().find_map(|id| {
            let route = &self.routes[id.0];
            route
                .matches(path)
                .map(|params| RouteMatch::found(route, params))
        })
    }
}
