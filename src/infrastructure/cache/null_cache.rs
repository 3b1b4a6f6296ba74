//! No-op cache implementation for disabled caching.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// A cache implementation that stores nothing.
///
/// Used when Redis is not configured or unreachable at startup. Every lookup is
/// a miss, so the engine runs store-only.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_cache_always_misses() {
        let cache = NullCache::new();
        cache
            .set("abcd1234", "value", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(cache.get("abcd1234").await.unwrap().is_none());
        assert!(cache.health_check().await);
    }
}
