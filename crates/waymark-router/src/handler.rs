//! Handler and middleware references.
//!
//! The router never calls a handler. It carries an opaque reference that the
//! dispatcher resolves (usually through a DI container) after a match. The
//! reference is a tagged enum so the dispatcher can branch on
//! [`HandlerKind`] instead of probing the value at runtime.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// An opaque, shareable value the router stores but never inspects.
#[derive(Clone)]
pub struct Opaque(Arc<dyn Any + Send + Sync>);

impl Opaque {
    /// Wraps any thread-safe value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Returns the wrapped value if it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Returns true if both references point at the same value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Opaque(..)")
    }
}

/// Discriminator for [`Handler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    /// An anonymous function value.
    Closure,
    /// A (class, method) pair.
    Action,
    /// A class name resolved and invoked as a whole.
    Class,
    /// An already-constructed invokable object.
    Invokable,
}

impl HandlerKind {
    /// Short lowercase label used in route listings and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Closure => "closure",
            Self::Action => "action",
            Self::Class => "class",
            Self::Invokable => "invokable",
        }
    }
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A route handler or middleware reference.
///
/// # Example
///
/// ```rust
/// use waymark_router::{Handler, HandlerKind};
///
/// let show = Handler::action("UserController", "show");
/// assert_eq!(show.kind(), HandlerKind::Action);
/// assert!(show.descriptor().is_some());
///
/// let inline = Handler::closure(|| "hello");
/// assert_eq!(inline.kind(), HandlerKind::Closure);
/// assert!(inline.descriptor().is_none());
/// ```
#[derive(Debug, Clone)]
pub enum Handler {
    /// An anonymous function value.
    Closure(Opaque),
    /// A method on a class.
    Action {
        /// Class name.
        class: String,
        /// Method name.
        method: String,
    },
    /// A class name.
    Class(String),
    /// An invokable object instance.
    Invokable(Opaque),
}

/// Middleware entries share the handler representation.
pub type Middleware = Handler;

impl Handler {
    /// Wraps an anonymous function.
    pub fn closure<F: Any + Send + Sync>(f: F) -> Self {
        Self::Closure(Opaque::new(f))
    }

    /// References `class::method`.
    pub fn action(class: impl Into<String>, method: impl Into<String>) -> Self {
        Self::Action {
            class: class.into(),
            method: method.into(),
        }
    }

    /// References a class by name.
    pub fn class(class: impl Into<String>) -> Self {
        Self::Class(class.into())
    }

    /// Wraps an invokable object.
    pub fn invokable<T: Any + Send + Sync>(object: T) -> Self {
        Self::Invokable(Opaque::new(object))
    }

    /// Returns the variant discriminator.
    pub const fn kind(&self) -> HandlerKind {
        match self {
            Self::Closure(_) => HandlerKind::Closure,
            Self::Action { .. } => HandlerKind::Action,
            Self::Class(_) => HandlerKind::Class,
            Self::Invokable(_) => HandlerKind::Invokable,
        }
    }

    /// Returns the plain-data form, or `None` for function and object values.
    pub fn descriptor(&self) -> Option<HandlerDescriptor> {
        match self {
            Self::Action { class, method } => Some(HandlerDescriptor::Action {
                class: class.clone(),
                method: method.clone(),
            }),
            Self::Class(class) => Some(HandlerDescriptor::Class {
                class: class.clone(),
            }),
            Self::Closure(_) | Self::Invokable(_) => None,
        }
    }

    /// Returns true if the reference can be written to a cache artifact.
    pub fn is_serializable(&self) -> bool {
        matches!(self, Self::Action { .. } | Self::Class(_))
    }
}

impl fmt::Display for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closure(_) => f.write_str("Closure"),
            Self::Action { class, method } => write!(f, "{class}@{method}"),
            Self::Class(class) => f.write_str(class),
            Self::Invokable(_) => f.write_str("Invokable"),
        }
    }
}

impl From<HandlerDescriptor> for Handler {
    fn from(descriptor: HandlerDescriptor) -> Self {
        match descriptor {
            HandlerDescriptor::Action { class, method } => Self::Action { class, method },
            HandlerDescriptor::Class { class } => Self::Class(class),
        }
    }
}

/// Serializable description of a handler or middleware.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HandlerDescriptor {
    /// `class::method`.
    Action {
        /// Class name.
        class: String,
        /// Method name.
        method: String,
    },
    /// A class name.
    Class {
        /// Class name.
        class: String,
    },
}

impl fmt::Display for HandlerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action { class, method } => write!(f, "{class}@{method}"),
            Self::Class { class } => f.write_str(class),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_kinds() {
        assert_eq!(Handler::closure(|| ()).kind(), HandlerKind::Closure);
        assert_eq!(Handler::action("A", "b").kind(), HandlerKind::Action);
        assert_eq!(Handler::class("A").kind(), HandlerKind::Class);
        assert_eq!(Handler::invokable(5_u8).kind(), HandlerKind::Invokable);
    }

    #[test]
    fn test_descriptor_round_trip() {
        let handler = Handler::action("UserController", "show");
        let descriptor = handler.descriptor().unwrap();
        let back = Handler::from(descriptor.clone());
        assert_eq!(back.descriptor(), Some(descriptor));
    }

    #[test]
    fn test_closure_has_no_descriptor() {
        assert!(Handler::closure(|| 1).descriptor().is_none());
        assert!(Handler::invokable("obj").descriptor().is_none());
        assert!(!Handler::closure(|| 1).is_serializable());
        assert!(Handler::class("Home").is_serializable());
    }

    #[test]
    fn test_opaque_downcast() {
        let handler = Handler::invokable(42_u32);
        let Handler::Invokable(object) = handler else {
            panic!("expected invokable");
        };
        assert_eq!(object.downcast_ref::<u32>(), Some(&42));
        assert!(object.downcast_ref::<String>().is_none());
    }

    #[test]
    fn test_descriptor_serialization_is_tagged() {
        let json = serde_json::to_string(&HandlerDescriptor::Class {
            class: "Home".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"kind":"class","class":"Home"}"#);
    }

    #[test]
    fn test_display() {
        assert_eq!(Handler::action("Users", "index").to_string(), "Users@index");
        assert_eq!(Handler::closure(|| ()).to_string(), "Closure");
    }
}
