//! Controller backing-file existence checks.
//!
//! Filesystem stats are comparatively expensive under high request volume,
//! and controller layout only changes at deploy time, so the check can be
//! memoized behind a short TTL. Environments where files appear and vanish
//! at runtime (test suites, scaffolding tools) run without a cache and see
//! the live filesystem on every call.

use bireli_cache::Cache;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Namespace prefix for cached existence flags
const KEY_PREFIX: &str = "bireli.dispatch.controller_file";

fn cache_key(path: &Path) -> String {
    format!("{KEY_PREFIX}:{}", path.display())
}

/// Backing-file existence check, optionally memoized through a [`Cache`].
#[derive(Clone)]
pub struct FileExistence {
    cache: Option<Arc<dyn Cache>>,
    ttl: Duration,
}

impl FileExistence {
    /// Uncached check: every call stats the filesystem
    pub fn direct() -> Self {
        Self {
            cache: None,
            ttl: Duration::ZERO,
        }
    }

    /// Memoized check: results are stored as 0/1 flags under a namespaced
    /// key for `ttl`
    pub fn cached(cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        Self {
            cache: Some(cache),
            ttl,
        }
    }

    /// Whether this check consults a cache
    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Whether the controller backing file at `path` exists.
    ///
    /// On a cache hit the flag is trusted without touching the filesystem;
    /// a stale answer within the TTL window is an accepted trade-off. Cache
    /// failures degrade to a real filesystem check.
    pub async fn controller_file_exists(&self, path: &Path) -> bool {
        let Some(cache) = &self.cache else {
            return path.exists();
        };

        let key = cache_key(path);
        match cache.fetch_local(&key).await {
            Ok(Some(flag)) => return flag == Value::from(1),
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, path = %path.display(), "existence cache fetch failed, checking filesystem");
                return path.exists();
            }
        }

        let exists = path.exists();
        let flag = Value::from(if exists { 1 } else { 0 });
        if let Err(e) = cache.store_local(&key, flag, Some(self.ttl)).await {
            warn!(error = %e, path = %path.display(), "existence cache store failed");
        }
        exists
    }
}
