//! On-disk artifact framing.
//!
//! ```json
//! { "version": 1, "checksum": "<sha1 hex>", "routes": { "static": {}, "dynamic": {}, "named": {} } }
//! ```
//!
//! The checksum covers the JSON encoding of `routes`, so a stale or hand-edited
//! artifact is refused instead of silently routing requests.

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use waymark_router::CacheArtifact;

use crate::error::{CacheError, CacheResult};

/// Artifact format version written by this build.
pub const FORMAT_VERSION: u32 = 1;

/// A versioned, checksummed artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEnvelope {
    /// Format version.
    pub version: u32,
    /// SHA-1 of the encoded routes, lowercase hex.
    pub checksum: String,
    /// The routes.
    pub routes: CacheArtifact,
}

impl CacheEnvelope {
    /// Wraps `routes` with the current version and its checksum.
    pub fn seal(routes: CacheArtifact) -> CacheResult<Self> {
        let checksum = checksum(&routes)?;
        Ok(Self {
            version: FORMAT_VERSION,
            checksum,
            routes,
        })
    }

    /// Verifies the version and checksum, returning the routes.
    pub fn open(self) -> CacheResult<CacheArtifact> {
        if self.version != FORMAT_VERSION {
            return Err(CacheError::IncompatibleVersion {
                found: self.version,
                expected: FORMAT_VERSION,
            });
        }

        let actual = checksum(&self.routes)?;
        if actual != self.checksum {
            return Err(CacheError::ChecksumMismatch {
                expected: self.checksum,
                actual,
            });
        }

        Ok(self.routes)
    }

    /// Encodes the envelope as pretty-printed JSON.
    pub fn to_json(&self) -> CacheResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decodes an envelope without verifying it.
    pub fn from_json(json: &str) -> CacheResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// SHA-1 of the compact JSON encoding of `routes`.
pub fn checksum(routes: &CacheArtifact) -> CacheResult<String> {
    let bytes = serde_json::to_vec(routes)?;
    Ok(format!("{:x}", Sha1::digest(&bytes)))
}
