//! Router error types.
//!
//! Compilation and registration errors are boot-time failures; a request
//! that matches nothing is reported through [`RouteMatch::not_found`]
//! instead of an error.
//!
//! [`RouteMatch::not_found`]: crate::RouteMatch::not_found

use thiserror::Error;

/// Result type for router operations.
pub type RouterResult<T> = Result<T, RouterError>;

/// Errors raised while compiling a path template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A `{` without a matching `}` (or the reverse).
    #[error("unbalanced placeholder braces in template '{template}' at byte {position}")]
    UnbalancedBraces {
        /// The offending template.
        template: String,
        /// Byte offset where the imbalance was detected.
        position: usize,
    },

    /// A placeholder with an empty or malformed name.
    #[error("invalid parameter name '{name}' in template '{template}'")]
    InvalidParamName {
        /// The offending template.
        template: String,
        /// The rejected name.
        name: String,
    },

    /// The same parameter name appears twice in one template.
    #[error("duplicate parameter '{name}' in template '{template}'")]
    DuplicateParam {
        /// The offending template.
        template: String,
        /// The repeated name.
        name: String,
    },

    /// A `{name:regex}` constraint that is not a valid expression.
    #[error("invalid constraint for parameter '{name}' in template '{template}': {reason}")]
    InvalidConstraint {
        /// The offending template.
        template: String,
        /// Parameter carrying the constraint.
        name: String,
        /// Why the constraint was rejected.
        reason: String,
    },

    /// The assembled pattern failed to build.
    #[error("failed to build pattern for template '{template}': {reason}")]
    InvalidPattern {
        /// The offending template.
        template: String,
        /// Underlying regex error.
        reason: String,
    },
}

/// Errors that can occur while registering, naming or reversing routes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// The path template could not be compiled.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// The same method and template were registered twice.
    #[error("route {method} {path} is already registered")]
    DuplicateRoute {
        /// HTTP method.
        method: String,
        /// Path template.
        path: String,
    },

    /// A route name is already taken by another route.
    #[error("route name '{name}' is already registered")]
    DuplicateRouteName {
        /// The conflicting name.
        name: String,
    },

    /// A route that already carries a name was named again.
    #[error("route {method} {path} is already named '{name}'")]
    RouteAlreadyNamed {
        /// HTTP method.
        method: String,
        /// Path template.
        path: String,
        /// The existing name.
        name: String,
    },

    /// A route id that does not belong to this router.
    #[error("unknown route id {0}")]
    UnknownRoute(usize),

    /// `url()` or `named_route()` was called with an unregistered name.
    #[error("no route named '{name}'")]
    UnknownNamedRoute {
        /// The requested name.
        name: String,
    },

    /// A required placeholder had no value during URL generation.
    #[error("missing required parameter '{param}' for route '{name}'")]
    MissingUrlParameter {
        /// Route name.
        name: String,
        /// Missing parameter.
        param: String,
    },

    /// Attempted to register routes on a cached router.
    #[error("cannot mutate a cached router")]
    ReadOnly,

    /// A cache artifact could not be turned into a route table.
    #[error("invalid cache artifact: {0}")]
    InvalidArtifact(String),
}

impl RouterError {
    /// Create an unknown named route error.
    pub fn unknown_named_route(name: impl Into<String>) -> Self {
        Self::UnknownNamedRoute { name: name.into() }
    }

    /// Create an invalid artifact error.
    pub fn invalid_artifact(message: impl Into<String>) -> Self {
        Self::InvalidArtifact(message.into())
    }
}
