//! Route cache for Waymark.
//!
//! A deploy step calls [`RouteCache::warm`] on a fully populated
//! [`Router`](waymark_router::Router). Production processes then call
//! [`RouteCache::load`] and serve requests from a
//! [`CachedRouter`](waymark_router::CachedRouter) without compiling a single
//! template.
//!
//! Only routes whose handler and middleware are plain data (a class or a
//! class/method pair) are cached; the rest are listed in the
//! [`WarmReport`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cache;
mod envelope;
mod error;
mod snapshot;

pub use cache::{RouteCache, DEFAULT_CACHE_PATH};
pub use envelope::{checksum, CacheEnvelope, FORMAT_VERSION};
pub use error::{CacheError, CacheResult};
pub use snapshot::{snapshot, SkipReason, SkippedRoute, WarmReport};
