//! Read-through projection cache used by the resolution engine.

use chrono::{DateTime, Utc};
use metrics::counter;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::service::CacheService;
use crate::domain::entities::CacheProjection;

const CACHE_HITS_TOTAL: &str = "shortlink_cache_hits_total";
const CACHE_MISSES_TOTAL: &str = "shortlink_cache_misses_total";
const CACHE_ERRORS_TOTAL: &str = "shortlink_cache_errors_total";

/// Typed, fail-open wrapper around a [`CacheService`].
///
/// Stores [`CacheProjection`]s as JSON keyed by slug. Every backend failure
/// (error, timeout, undecodable payload) is logged and turned into a miss or a
/// skipped write; nothing here returns an error.
#[derive(Clone)]
pub struct ProjectionCache {
    backend: Arc<dyn CacheService>,
    default_ttl: Duration,
    timeout: Duration,
}

impl ProjectionCache {
    /// Creates a projection cache.
    ///
    /// - `default_ttl` - TTL for links without expiration, and upper bound otherwise
    /// - `timeout` - per-call budget for backend operations
    pub fn new(backend: Arc<dyn CacheService>, default_ttl: Duration, timeout: Duration) -> Self {
        Self {
            backend,
            default_ttl,
            timeout,
        }
    }

    /// Looks up the projection for `slug`.
    pub async fn get(&self, slug: &str) -> Option<CacheProjection> {
        let raw = match timeout(self.timeout, self.backend.get(slug)).await {
            Ok(Ok(Some(raw))) => raw,
            Ok(Ok(None)) => {
                debug!(slug = %slug, "Cache MISS");
                counter!(CACHE_MISSES_TOTAL).increment(1);
                return None;
            }
            Ok(Err(e)) => {
                warn!(slug = %slug, error = %e, "Cache GET failed, falling back to store");
                counter!(CACHE_ERRORS_TOTAL, "op" => "get").increment(1);
                return None;
            }
            Err(_) => {
                warn!(slug = %slug, "Cache GET timed out, falling back to store");
                counter!(CACHE_ERRORS_TOTAL, "op" => "get").increment(1);
                return None;
            }
        };

        match serde_json::from_str::<CacheProjection>(&raw) {
            Ok(projection) => {
                debug!(slug = %slug, "Cache HIT");
                counter!(CACHE_HITS_TOTAL).increment(1);
                Some(projection)
            }
            Err(e) => {
                warn!(slug = %slug, error = %e, "Undecodable cache entry, treating as miss");
                counter!(CACHE_ERRORS_TOTAL, "op" => "decode").increment(1);
                None
            }
        }
    }

    /// Caches `projection` under `slug` with the TTL derived at `now`.
    ///
    /// Returns whether a write was attempted and succeeded. Expired projections
    /// are skipped.
    pub async fn put(&self, slug: &str, projection: &CacheProjection, now: DateTime<Utc>) -> bool {
        let Some(ttl) = projection.ttl(now, self.default_ttl) else {
            debug!(slug = %slug, "Projection expired, not caching");
            return false;
        };

        let payload = match serde_json::to_string(projection) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(slug = %slug, error = %e, "Failed to encode projection");
                return false;
            }
        };

        match timeout(self.timeout, self.backend.set(slug, &payload, ttl)).await {
            Ok(Ok(())) => {
                debug!(slug = %slug, ttl_secs = ttl.as_secs(), "Cache SET");
                true
            }
            Ok(Err(e)) => {
                warn!(slug = %slug, error = %e, "Cache SET failed");
                counter!(CACHE_ERRORS_TOTAL, "op" => "set").increment(1);
                false
            }
            Err(_) => {
                warn!(slug = %slug, "Cache SET timed out");
                counter!(CACHE_ERRORS_TOTAL, "op" => "set").increment(1);
                false
            }
        }
    }

    /// Checks if the cache backend is healthy.
    pub async fn health_check(&self) -> bool {
        timeout(self.timeout, self.backend.health_check())
            .await
            .unwrap_or(false)
    }
}
