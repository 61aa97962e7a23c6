//! The route cache on disk.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};
use waymark_router::{CacheArtifact, CachedRouter, Router};

use crate::envelope::CacheEnvelope;
use crate::error::{CacheError, CacheResult};
use crate::snapshot::{snapshot, WarmReport};

/// Default artifact location, relative to the application root.
pub const DEFAULT_CACHE_PATH: &str = "bootstrap/cache/routes.json";

/// Warms, loads and clears the route artifact at one path.
///
/// # Example
///
/// ```rust,no_run
/// use waymark_cache::RouteCache;
/// use waymark_router::{Handler, Router};
///
/// let mut router = Router::new();
/// router.get("/users/{id}", Handler::action("UserController", "show"))?;
///
/// let cache = RouteCache::new("bootstrap/cache/routes.json");
/// let report = cache.warm(&router)?;
/// assert_eq!(report.cached, 1);
///
/// let cached = cache.load()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct RouteCache {
    path: PathBuf,
}

impl Default for RouteCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_PATH)
    }
}

impl RouteCache {
    /// Creates a cache rooted at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The artifact path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if an artifact exists.
    pub fn is_cached(&self) -> bool {
        self.path.is_file()
    }

    /// Freezes `router` and writes the artifact.
    ///
    /// Routes whose handler or middleware cannot be serialized are reported in
    /// [`WarmReport::skipped`] and left out.
    pub fn warm(&self, router: &Router) -> CacheResult<WarmReport> {
        info!(path = %self.path.display(), routes = router.len(), "warming route cache");

        let (artifact, report) = snapshot(router);
        self.write(artifact)?;

        info!(
            path = %self.path.display(),
            cached = report.cached,
            skipped = report.skipped.len(),
            "route cache warmed"
        );
        Ok(report)
    }

    /// Writes `artifact`, replacing any previous one in a single rename.
    pub fn write(&self, artifact: CacheArtifact) -> CacheResult<()> {
        let json = CacheEnvelope::seal(artifact)?.to_json()?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| CacheError::io(dir, e))?;

        let mut file = NamedTempFile::new_in(dir).map_err(|e| CacheError::io(dir, e))?;
        file.write_all(json.as_bytes())
            .and_then(|()| file.as_file().sync_all())
            .map_err(|e| CacheError::io(file.path(), e))?;
        file.persist(&self.path)
            .map_err(|e| CacheError::io(&self.path, e.error))?;

        debug!(path = %self.path.display(), bytes = json.len(), "route cache written");
        Ok(())
    }

    /// Reads and verifies the artifact.
    pub fn load_artifact(&self) -> CacheResult<CacheArtifact> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(CacheError::not_found(&self.path));
            }
            Err(e) => return Err(CacheError::io(&self.path, e)),
        };

        CacheEnvelope::from_json(&content)?.open()
    }

    /// Reads the artifact and restores a [`CachedRouter`] from it.
    pub fn load(&self) -> CacheResult<CachedRouter> {
        info!(path = %self.path.display(), "loading route cache");

        let router = CachedRouter::from_artifact(self.load_artifact()?)?;

        debug!(
            path = %self.path.display(),
            routes = router.len(),
            "route cache loaded"
        );
        Ok(router)
    }

    /// Deletes the artifact.
    ///
    /// Returns whether a file was removed; a missing artifact is not an error.
    pub fn clear(&self) -> CacheResult<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "route cache cleared");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "route cache already clear");
                Ok(false)
            }
            Err(e) => Err(CacheError::io(&self.path, e)),
        }
    }
}
