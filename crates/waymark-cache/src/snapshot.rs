//! Freezing a live router into a cache artifact.

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use tracing::warn;
use waymark_router::{
    CacheArtifact, Handler, HandlerDescriptor, HandlerKind, NamedRecord, Route, RouteRecord,
    Router,
};

/// Why a route was left out of the artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// The handler is an anonymous function.
    ClosureHandler,
    /// The handler is an object instance.
    InvokableHandler,
    /// A middleware entry is an anonymous function.
    ClosureMiddleware,
    /// A middleware entry is an object instance.
    InvokableMiddleware,
}

impl SkipReason {
    /// Human-readable reason, as shown by the warm command.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClosureHandler => "Handler is a Closure",
            Self::InvokableHandler => "Handler is an invokable object",
            Self::ClosureMiddleware => "Middleware contains a Closure",
            Self::InvokableMiddleware => "Middleware contains an invokable object",
        }
    }

    /// The first reason `route` cannot be cached, if any.
    pub fn for_route(route: &Route) -> Option<Self> {
        match route.handler().kind() {
            HandlerKind::Closure => return Some(Self::ClosureHandler),
            HandlerKind::Invokable => return Some(Self::InvokableHandler),
            HandlerKind::Action | HandlerKind::Class => {}
        }

        route
            .middleware()
            .iter()
            .find_map(|middleware| match middleware.kind() {
                HandlerKind::Closure => Some(Self::ClosureMiddleware),
                HandlerKind::Invokable => Some(Self::InvokableMiddleware),
                HandlerKind::Action | HandlerKind::Class => None,
            })
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A route that could not be cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRoute {
    /// HTTP method.
    pub method: String,
    /// Path template.
    pub path: String,
    /// Route name, if any.
    pub name: Option<String>,
    /// Why it was skipped.
    pub reason: SkipReason,
}

impl fmt::Display for SkippedRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.method, self.path, self.reason)
    }
}

/// Outcome of warming the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WarmReport {
    /// Number of routes written to the artifact.
    pub cached: usize,
    /// Routes left out, in registration order.
    pub skipped: Vec<SkippedRoute>,
    /// Distinct handler descriptors of the cached routes, for container
    /// reflection caches that run alongside the route cache.
    pub handlers: Vec<HandlerDescriptor>,
}

/// Builds the artifact for `router` without touching the filesystem.
pub fn snapshot(router: &Router) -> (CacheArtifact, WarmReport) {
    let mut artifact = CacheArtifact::default();
    let mut handlers = IndexSet::new();
    let mut skipped: IndexMap<usize, SkippedRoute> = IndexMap::new();

    for (method, literal, id) in router.static_entries() {
        let Some(route) = router.route(id) else {
            continue;
        };
        match record(id.index(), route) {
            Ok(record) => {
                handlers.insert(record.handler.clone());
                artifact
                    .static_routes
                    .entry(method.to_string())
                    .or_default()
                    .insert(literal.to_string(), record);
            }
            Err(reason) => {
                skipped.insert(id.index(), skipped_route(route, reason));
            }
        }
    }

    for (method, count, ids) in router.dynamic_entries() {
        for id in ids {
            let Some(route) = router.route(*id) else {
                continue;
            };
            match record(id.index(), route) {
                Ok(record) => {
                    handlers.insert(record.handler.clone());
                    artifact
                        .dynamic
                        .entry(method.to_string())
                        .or_default()
                        .entry(count)
                        .or_default()
                        .push(record);
                }
                Err(reason) => {
                    skipped.insert(id.index(), skipped_route(route, reason));
                }
            }
        }
    }

    for (name, route) in router.named_routes() {
        if SkipReason::for_route(route).is_none() {
            artifact.named.insert(
                name.to_string(),
                NamedRecord {
                    path: route.path().to_string(),
                    param_names: route.param_names().to_vec(),
                },
            );
        }
    }

    skipped.sort_keys();
    for entry in skipped.values() {
        warn!(
            method = %entry.method,
            path = %entry.path,
            reason = %entry.reason,
            "route not cacheable"
        );
    }

    let report = WarmReport {
        cached: artifact.route_count(),
        skipped: skipped.into_values().collect(),
        handlers: handlers.into_iter().collect(),
    };
    (artifact, report)
}

fn record(order: usize, route: &Route) -> Result<RouteRecord, SkipReason> {
    if let Some(reason) = SkipReason::for_route(route) {
        return Err(reason);
    }

    Ok(RouteRecord {
        order,
        path: route.path().to_string(),
        handler: descriptor(route.handler())?,
        pattern: route.pattern().clone(),
        param_names: route.param_names().to_vec(),
        middleware: route
            .middleware()
            .iter()
            .map(descriptor)
            .collect::<Result<_, _>>()?,
        name: route.name().map(ToString::to_string),
    })
}

fn descriptor(handler: &Handler) -> Result<HandlerDescriptor, SkipReason> {
    handler.descriptor().ok_or(match handler.kind() {
        HandlerKind::Invokable => SkipReason::InvokableHandler,
        _ => SkipReason::ClosureHandler,
    })
}

fn skipped_route(route: &Route, reason: SkipReason) -> SkippedRoute {
    SkippedRoute {
        method: route.method().to_string(),
        path: route.path().to_string(),
        name: route.name().map(ToString::to_string),
        reason,
    }
}
