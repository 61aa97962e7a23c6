//! Two-tier HTTP router for Waymark.
//!
//! This crate turns path templates into anchored patterns, resolves
//! `(method, path)` pairs to registered handlers, and generates URLs for named
//! routes. A populated [`Router`] can be frozen into a [`CacheArtifact`] and
//! restored as a [`CachedRouter`] that matches identically without compiling
//! anything.
//!
//! # Features
//!
//! - **Template compilation**: `{id}`, `{id?}`, `{id:\d+}` and `{id?:\d+}`
//! - **Static short-circuit**: parameter-free routes are a hash lookup and
//!   always beat dynamic routes of the same shape
//! - **Segment buckets**: dynamic routes are scanned only within the bucket
//!   for the request's segment count, then the remaining buckets
//! - **Reverse routing**: `url("users.show", &[("id", "5")])` → `/users/5`
//! - **Read/write split**: [`RouteMatcher`] for matching, [`RouteRegistry`]
//!   for registration
//!
//! # Example
//!
//! ```rust
//! use waymark_router::{Handler, RouteMatcher, Router};
//! use http::Method;
//!
//! let mut router = Router::new();
//! router.get("/", Handler::class("HomeController"))?;
//! router.get("/users/{id}", Handler::action("UserController", "show"))?;
//! router.get("/users/{id}/posts/{postId}", Handler::action("PostController", "show"))?;
//!
//! let m = router.match_route(&Method::GET, "/users/42/posts/7");
//! assert_eq!(m.param("id"), Some("42"));
//! assert_eq!(m.param("postId"), Some("7"));
//!
//! assert!(!router.match_route(&Method::GET, "/missing").is_matched());
//! # Ok::<(), waymark_router::RouterError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//!   template ──PathCompiler──▶ CompiledPath ──Router::add──▶ RouteTable
//!                                                              │
//!              static[method][path]       dynamic[method][segments]
//!                                                              │
//!   CacheArtifact ◀──────── warm ─────────────────────────────┘
//!        │
//!        └──CachedRouter::from_artifact──▶ RouteTable (same lookup)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifact;
mod cached;
mod compiler;
mod error;
mod handler;
mod matcher;
mod params;
mod reverse;
mod route;
mod router;
mod table;
mod template;

pub use artifact::{CacheArtifact, DynamicRecords, NamedRecord, RouteRecord, StaticRecords};
pub use cached::CachedRouter;
pub use compiler::{CompiledPath, PathCompiler, Pattern};
pub use error::{CompileError, RouterError, RouterResult};
pub use handler::{Handler, HandlerDescriptor, HandlerKind, Middleware, Opaque};
pub use matcher::{RouteMatcher, RouteRegistry};
pub use params::Params;
pub use route::{Route, RouteId, RouteMatch};
pub use router::{RouteMut, Router};
pub use template::{normalize_path, segment_count};
