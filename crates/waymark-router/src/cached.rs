//! Read-only router rebuilt from a cache artifact.

use http::Method;
use indexmap::IndexMap;
use tracing::debug;

use crate::artifact::{CacheArtifact, RouteRecord};
use crate::error::{RouterError, RouterResult};
use crate::handler::Handler;
use crate::matcher::RouteMatcher;
use crate::reverse;
use crate::route::{Route, RouteId, RouteMatch};
use crate::table::RouteTable;
use crate::template::segment_count;

#[derive(Debug, Clone)]
struct NamedEntry {
    id: RouteId,
    path: String,
}

/// A router that matches from a precomputed artifact.
///
/// Patterns and parameter names are taken verbatim from the artifact, so no
/// template is compiled at construction or on the request path. Only
/// [`RouteMatcher`] is implemented: a cached router cannot gain routes.
///
/// ```rust
/// use waymark_router::{CacheArtifact, CachedRouter, RouteMatcher};
/// use http::Method;
///
/// let artifact: CacheArtifact = serde_json::from_str(r#"{
///     "static": {},
///     "dynamic": { "GET": { "2": [{
///         "order": 0,
///         "path": "/users/{id}",
///         "handler": { "kind": "class", "class": "UserController" },
///         "pattern": "^/users/([^/]+)$",
///         "param_names": ["id"]
///     }] } },
///     "named": {}
/// }"#).unwrap();
///
/// let cached = CachedRouter::from_artifact(artifact)?;
/// assert_eq!(cached.match_route(&Method::GET, "/users/3").param("id"), Some("3"));
/// # Ok::<(), waymark_router::RouterError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CachedRouter {
    table: RouteTable,
    named: IndexMap<String, NamedEntry>,
}

impl CachedRouter {
    /// Rebuilds the route table stored in `artifact`.
    ///
    /// Routes are restored in their original registration order so
    /// first-match-wins scanning behaves exactly as it did on the live router.
    pub fn from_artifact(artifact: CacheArtifact) -> RouterResult<Self> {
        let CacheArtifact {
            static_routes,
            dynamic,
            named,
        } = artifact;

        let mut records: Vec<(Method, usize, RouteRecord)> = Vec::new();

        for (method, bucket) in static_routes {
            let method = parse_method(&method)?;
            for (literal, record) in bucket {
                if !record.param_names.is_empty() {
                    return Err(RouterError::invalid_artifact(format!(
                        "static route '{literal}' declares parameters"
                    )));
                }
                records.push((method.clone(), segment_count(&literal), record));
            }
        }

        for (method, buckets) in dynamic {
            let method = parse_method(&method)?;
            for (count, bucket) in buckets {
                for record in bucket {
                    if record.param_names.is_empty() {
                        return Err(RouterError::invalid_artifact(format!(
                            "dynamic route '{}' declares no parameters",
                            record.path
                        )));
                    }
                    records.push((method.clone(), count, record));
                }
            }
        }

        records.sort_by_key(|(_, _, record)| record.order);

        let mut table = RouteTable::default();
        for (method, count, record) in records {
            table.push(restore(method, count, record)?);
        }

        let mut index = IndexMap::with_capacity(named.len());
        for (name, entry) in named {
            let id = table
                .routes()
                .iter()
                .position(|route| route.name() == Some(name.as_str()))
                .map(RouteId)
                .ok_or_else(|| {
                    RouterError::invalid_artifact(format!(
                        "named route '{name}' has no matching record"
                    ))
                })?;
            index.insert(name, NamedEntry { id, path: entry.path });
        }

        debug!(
            routes = table.routes().len(),
            named = index.len(),
            "cached router restored"
        );

        Ok(Self {
            table,
            named: index,
        })
    }

    /// Returns the number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.routes().len()
    }

    /// Returns true if the artifact held no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.routes().is_empty()
    }

    /// Iterates over named routes in artifact order.
    pub fn named_routes(&self) -> impl Iterator<Item = (&str, &Route)> {
        self.named.iter().filter_map(|(name, entry)| {
            self.table.get(entry.id).map(|route| (name.as_str(), route))
        })
    }
}

impl RouteMatcher for CachedRouter {
    fn match_route(&self, method: &Method, path: &str) -> RouteMatch<'_> {
        self.table.lookup(method, path)
    }

    fn url(&self, name: &str, params: &[(&str, &str)]) -> RouterResult<String> {
        let entry = self
            .named
            .get(name)
            .ok_or_else(|| RouterError::unknown_named_route(name))?;
        reverse::generate(name, &entry.path, params)
    }

    fn routes(&self) -> &[Route] {
        self.table.routes()
    }

    fn named_route(&self, name: &str) -> RouterResult<&Route> {
        self.named
            .get(name)
            .and_then(|entry| self.table.get(entry.id))
            .ok_or_else(|| RouterError::unknown_named_route(name))
    }
}

fn parse_method(method: &str) -> RouterResult<Method> {
    Method::from_bytes(method.as_bytes())
        .map_err(|_| RouterError::invalid_artifact(format!("invalid method '{method}'")))
}

fn restore(method: Method, count: usize, record: RouteRecord) -> RouterResult<Route> {
    if record.pattern.capture_count() != record.param_names.len() {
        return Err(RouterError::invalid_artifact(format!(
            "pattern for '{}' has {} captures but {} parameter names",
            record.path,
            record.pattern.capture_count(),
            record.param_names.len()
        )));
    }

    Ok(Route::from_parts(
        method,
        record.path,
        Handler::from(record.handler),
        record.pattern,
        record.param_names,
        count,
        record.name,
        record.middleware.into_iter().map(Handler::from).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::NamedRecord;
    use crate::compiler::Pattern;
    use crate::handler::HandlerDescriptor;

    fn record(order: usize, path: &str, pattern: &str, params: &[&str], class: &str) -> RouteRecord {
        RouteRecord {
            order,
            path: path.to_string(),
            handler: HandlerDescriptor::Class {
                class: class.to_string(),
            },
            pattern: Pattern::from_source(pattern).unwrap(),
            param_names: params.iter().map(ToString::to_string).collect(),
            middleware: Vec::new(),
            name: None,
        }
    }

    fn artifact() -> CacheArtifact {
        let mut artifact = CacheArtifact::default();
        artifact
            .static_routes
            .entry("GET".to_string())
            .or_default()
            .insert("/users/me".to_string(), record(1, "/users/me", "^/users/me$", &[], "Me"));

        let mut show = record(0, "/users/{id}", "^/users/([^/]+)$", &["id"], "Show");
        show.name = Some("users.show".to_string());
        show.middleware.push(HandlerDescriptor::Class {
            class: "Auth".to_string(),
        });
        artifact
            .dynamic
            .entry("GET".to_string())
            .or_default()
            .entry(2)
            .or_default()
            .push(show);

        artifact.named.insert(
            "users.show".to_string(),
            NamedRecord {
                path: "/users/{id}".to_string(),
                param_names: vec!["id".to_string()],
            },
        );
        artifact
    }

    #[test]
    fn test_restores_registration_order() {
        let cached = CachedRouter::from_artifact(artifact()).unwrap();
        let paths: Vec<_> = cached.routes().iter().map(Route::path).collect();
        assert_eq!(paths, vec!["/users/{id}", "/users/me"]);
        assert_eq!(cached.len(), 2);
    }

    #[test]
    fn test_static_precedence() {
        let cached = CachedRouter::from_artifact(artifact()).unwrap();
        let m = cached.match_route(&Method::GET, "/users/me");
        assert_eq!(m.route().unwrap().handler().to_string(), "Me");

        let m = cached.match_route(&Method::GET, "/users/8");
        assert_eq!(m.param("id"), Some("8"));
        assert_eq!(m.route().unwrap().middleware()[0].to_string(), "Auth");
    }

    #[test]
    fn test_named_lookup_and_url() {
        let cached = CachedRouter::from_artifact(artifact()).unwrap();
        assert_eq!(cached.named_route("users.show").unwrap().path(), "/users/{id}");
        assert_eq!(cached.url("users.show", &[("id", "5")]).unwrap(), "/users/5");
        assert_eq!(
            cached.url("nope", &[]).unwrap_err(),
            RouterError::unknown_named_route("nope")
        );
    }

    #[test]
    fn test_dangling_named_entry_rejected() {
        let mut artifact = artifact();
        artifact.named.insert(
            "ghost".to_string(),
            NamedRecord {
                path: "/ghost".to_string(),
                param_names: Vec::new(),
            },
        );
        let err = CachedRouter::from_artifact(artifact).unwrap_err();
        assert!(matches!(err, RouterError::InvalidArtifact(_)));
    }

    #[test]
    fn test_capture_mismatch_rejected() {
        let mut artifact = CacheArtifact::default();
        artifact
            .dynamic
            .entry("GET".to_string())
            .or_default()
            .entry(2)
            .or_default()
            .push(record(0, "/a/{b}", "^/a/[^/]+$", &["b"], "A"));
        let err = CachedRouter::from_artifact(artifact).unwrap_err();
        assert!(matches!(err, RouterError::InvalidArtifact(_)));
    }

    #[test]
    fn test_invalid_method_rejected() {
        let mut artifact = CacheArtifact::default();
        artifact
            .static_routes
            .entry("BAD METHOD".to_string())
            .or_default()
            .insert("/".to_string(), record(0, "/", "^/$", &[], "Home"));
        let err = CachedRouter::from_artifact(artifact).unwrap_err();
        assert!(matches!(err, RouterError::InvalidArtifact(_)));
    }

    #[test]
    fn test_empty_artifact() {
        let cached = CachedRouter::from_artifact(CacheArtifact::default()).unwrap();
        assert!(cached.is_empty());
        assert!(!cached.match_route(&Method::GET, "/").is_matched());
    }
}
