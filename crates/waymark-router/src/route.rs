//! Routes and match results.

use http::Method;

use crate::compiler::{CompiledPath, Pattern};
use crate::error::{RouterError, RouterResult};
use crate::handler::{Handler, Middleware};
use crate::params::Params;

/// Position of a route inside the router that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(pub(crate) usize);

impl RouteId {
    /// Returns the registration index.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A method + path binding to a handler.
///
/// Method, path, handler, pattern and parameter names are fixed at
/// construction. The name and middleware list are only reachable for writing
/// through the owning [`Router`](crate::Router), and never on a cached route.
#[derive(Debug, Clone)]
pub struct Route {
    method: Method,
    path: String,
    handler: Handler,
    pattern: Pattern,
    param_names: Vec<String>,
    segment_count: usize,
    name: Option<String>,
    middleware: Vec<Middleware>,
}

impl Route {
    /// Creates a route from a compiled template.
    pub fn new(method: Method, compiled: CompiledPath, handler: Handler) -> Self {
        Self {
            method,
            path: compiled.template,
            handler,
            pattern: compiled.pattern,
            param_names: compiled.param_names,
            segment_count: compiled.segment_count,
            name: None,
            middleware: Vec::new(),
        }
    }

    /// Rebuilds a route from stored parts without compiling anything.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        method: Method,
        path: String,
        handler: Handler,
        pattern: Pattern,
        param_names: Vec<String>,
        segment_count: usize,
        name: Option<String>,
        middleware: Vec<Middleware>,
    ) -> Self {
        Self {
            method,
            path,
            handler,
            pattern,
            param_names,
            segment_count,
            name,
            middleware,
        }
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Normalized path template.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Handler reference.
    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// Compiled pattern.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Parameter names, in capture order.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Segment count with every placeholder present.
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Route name, if one was assigned.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Middleware, in the order the dispatcher runs it.
    pub fn middleware(&self) -> &[Middleware] {
        &self.middleware
    }

    /// Returns true if the path has no placeholders.
    pub fn is_static(&self) -> bool {
        self.param_names.is_empty()
    }

    /// Applies the pattern to a normalized path.
    ///
    /// Returns the captured parameters with empty optional captures
    /// stripped, or `None` when the path does not match.
    pub fn matches(&self, path: &str) -> Option<Params> {
        self.pattern.extract(path, &self.param_names)
    }

    pub(crate) fn assign_name(&mut self, name: &str) -> RouterResult<()> {
        match &self.name {
            Some(existing) if existing == name => Ok(()),
            Some(existing) => Err(RouterError::RouteAlreadyNamed {
                method: self.method.to_string(),
                path: self.path.clone(),
                name: existing.clone(),
            }),
            None => {
                self.name = Some(name.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn push_middleware(&mut self, middleware: Middleware) {
        self.middleware.push(middleware);
    }
}

/// The routing decision handed to the dispatcher.
///
/// A request that matches nothing yields [`RouteMatch::not_found`], a value
/// rather than an error.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    route: Option<&'a Route>,
    params: Params,
}

impl<'a> RouteMatch<'a> {
    /// A successful match.
    pub fn found(route: &'a Route, params: Params) -> Self {
        Self {
            route: Some(route),
            params,
        }
    }

    /// No route matched.
    pub fn not_found() -> Self {
        Self {
            route: None,
            params: Params::new(),
        }
    }

    /// Returns true if a route matched.
    pub fn is_matched(&self) -> bool {
        self.route.is_some()
    }

    /// The matched route.
    pub fn route(&self) -> Option<&'a Route> {
        self.route
    }

    /// Captured parameters (empty when nothing matched).
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// A single captured parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Consumes the match, returning its parameters.
    pub fn into_params(self) -> Params {
        self.params
    }
}
