//! Serializable snapshot of a router's compiled state.
//!
//! The artifact mirrors the live bucket layout so a [`CachedRouter`]
//! can rebuild its table without compiling a single template.
//!
//! [`CachedRouter`]: crate::CachedRouter

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::compiler::Pattern;
use crate::handler::HandlerDescriptor;

/// Static records: method → literal path → record.
pub type StaticRecords = IndexMap<String, IndexMap<String, RouteRecord>>;

/// Dynamic records: method → segment count → records in registration order.
pub type DynamicRecords = IndexMap<String, IndexMap<usize, Vec<RouteRecord>>>;

/// The cacheable part of a router.
///
/// ```json
/// {
///   "static":  { "GET": { "/": { ... } } },
///   "dynamic": { "GET": { "2": [ { ... } ] } },
///   "named":   { "users.show": { "path": "/users/{id}", "param_names": ["id"] } }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheArtifact {
    /// Zero-parameter routes.
    #[serde(rename = "static", default)]
    pub static_routes: StaticRecords,

    /// Routes with placeholders.
    #[serde(default)]
    pub dynamic: DynamicRecords,

    /// Reverse-lookup index.
    #[serde(default)]
    pub named: IndexMap<String, NamedRecord>,
}

impl CacheArtifact {
    /// Number of route records across both tiers.
    #[must_use]
    pub fn route_count(&self) -> usize {
        let statics: usize = self.static_routes.values().map(IndexMap::len).sum();
        let dynamic: usize = self
            .dynamic
            .values()
            .flat_map(IndexMap::values)
            .map(Vec::len)
            .sum();
        statics + dynamic
    }

    /// Returns true if the artifact holds no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.route_count() == 0
    }
}

/// One cached route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRecord {
    /// Registration ordinal in the originating router.
    pub order: usize,
    /// Raw path template.
    pub path: String,
    /// Handler reference.
    pub handler: HandlerDescriptor,
    /// Anchored pattern source.
    pub pattern: Pattern,
    /// Parameter names in capture order.
    pub param_names: Vec<String>,
    /// Middleware in dispatch order.
    #[serde(default)]
    pub middleware: Vec<HandlerDescriptor>,
    /// Route name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Enough of a named route to generate its URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRecord {
    /// Raw path template.
    pub path: String,
    /// Parameter names in template order.
    pub param_names: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(order: usize, path: &str, pattern: &str, params: &[&str]) -> RouteRecord {
        RouteRecord {
            order,
            path: path.to_string(),
            handler: HandlerDescriptor::Class {
                class: "Controller".to_string(),
            },
            pattern: Pattern::from_source(pattern).unwrap(),
            param_names: params.iter().map(ToString::to_string).collect(),
            middleware: Vec::new(),
            name: None,
        }
    }

    #[test]
    fn test_route_count() {
        let mut artifact = CacheArtifact::default();
        assert!(artifact.is_empty());

        artifact
            .static_routes
            .entry("GET".to_string())
            .or_default()
            .insert("/".to_string(), record(0, "/", "^/$", &[]));
        artifact
            .dynamic
            .entry("GET".to_string())
            .or_default()
            .entry(2)
            .or_default()
            .push(record(1, "/users/{id}", "^/users/([^/]+)$", &["id"]));

        assert_eq!(artifact.route_count(), 2);
    }

    #[test]
    fn test_artifact_json_shape() {
        let mut artifact = CacheArtifact::default();
        artifact
            .dynamic
            .entry("GET".to_string())
            .or_default()
            .entry(2)
            .or_default()
            .push(record(0, "/users/{id}", "^/users/([^/]+)$", &["id"]));
        artifact.named.insert(
            "users.show".to_string(),
            NamedRecord {
                path: "/users/{id}".to_string(),
                param_names: vec!["id".to_string()],
            },
        );

        let json = serde_json::to_value(&artifact).unwrap();
        assert!(json["static"].as_object().unwrap().is_empty());
        let stored = &json["dynamic"]["GET"]["2"][0];
        assert_eq!(stored["pattern"], "^/users/([^/]+)$");
        assert_eq!(stored["handler"]["kind"], "class");
        assert!(stored.get("name").is_none());
        assert_eq!(json["named"]["users.show"]["path"], "/users/{id}");

        let back: CacheArtifact = serde_json::from_value(json).unwrap();
        assert_eq!(back, artifact);
    }

    #[test]
    fn test_record_defaults() {
        let json = serde_json::json!({
            "order": 3,
            "path": "/about",
            "handler": { "kind": "action", "class": "PageController", "method": "about" },
            "pattern": "^/about$",
            "param_names": []
        });
        let record: RouteRecord = serde_json::from_value(json).unwrap();
        assert!(record.middleware.is_empty());
        assert!(record.name.is_none());
    }
}
