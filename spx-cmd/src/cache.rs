//! Response cache - reuse a FRED body fetched recently instead of asking again.
//!
//! The index only gains one reading per trading day, so by default a cached
//! body stays fresh for a day.

use log::{debug, info, warn};
use spx_fred::query::ObservationQuery;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Default freshness window: one day.
pub const DEFAULT_MAX_AGE_SECS: u64 = 86_400;

/// Raw FRED response bodies on disk, one file per query.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
    max_age: Duration,
}

impl ResponseCache {
    pub fn new(dir: impl Into<PathBuf>, max_age: Duration) -> Self {
        ResponseCache {
            dir: dir.into(),
            max_age,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the body for `query`.
    pub fn path_for(&self, query: &ObservationQuery) -> PathBuf {
        self.dir.join(format!("{}.json", query.cache_key()))
    }

    /// The cached body for `query`, if there is one younger than the max age.
    ///
    /// Unreadable entries count as missing.
    pub async fn read_fresh(&self, query: &ObservationQuery) -> Option<String> {
        let path = self.path_for(query);
        let modified = tokio::fs::metadata(&path).await.ok()?.modified().ok()?;
        if !is_fresh(modified, SystemTime::now(), self.max_age) {
            debug!("Cache entry {} is stale", path.display());
            return None;
        }
        match tokio::fs::read_to_string(&path).await {
            Ok(body) => {
                info!("Using cached response {}", path.display());
                Some(body)
            }
            Err(e) => {
                warn!("Failed to read cache entry {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Store `body` for `query`. Failures are logged, never returned.
    pub async fn write(&self, query: &ObservationQuery, body: &str) {
        let path = self.path_for(query);
        if let Err(e) = self.try_write(&path, body).await {
            warn!("Failed to write cache entry {}: {}", path.display(), e);
        } else {
            debug!("Cached response at {}", path.display());
        }
    }

    async fn try_write(&self, path: &Path, body: &str) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(path, body).await
    }
}

/// Whether an entry last modified at `modified` is still usable at `now`.
///
/// Entries stamped in the future (clock skew) are treated as fresh.
pub fn is_fresh(modified: SystemTime, now: SystemTime, max_age: Duration) -> bool {
    match now.duration_since(modified) {
        Ok(age) => age < max_age,
        Err(_) => true,
    }
}
