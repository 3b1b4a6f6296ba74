//! Cached projection of a short link.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::short_link::ShortLink;

/// The subset of a [`ShortLink`] needed to answer a redirect.
///
/// Serialized as `{"url", "trackClicks", "expireAt"?}` in the cache store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheProjection {
    pub url: String,
    pub track_clicks: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_at: Option<DateTime<Utc>>,
}

impl CacheProjection {
    /// Time-to-live for this projection when cached at `now`.
    ///
    /// `default_ttl` applies to links without expiration. Otherwise the TTL is the
    /// whole number of seconds until `expire_at`, never longer than `default_ttl`
    /// and never past the expiration. Returns `None` when the link is already
    /// expired (or expires within the current second); such projections are not
    /// cached.
    pub fn ttl(&self, now: DateTime<Utc>, default_ttl: Duration) -> Option<Duration> {
        let Some(expire_at) = self.expire_at else {
            return Some(default_ttl).filter(|ttl| !ttl.is_zero());
        };

        let remaining = (expire_at - now).num_seconds();
        if remaining <= 0 {
            return None;
        }

        Some(Duration::from_secs(remaining as u64).min(default_ttl)).filter(|ttl| !ttl.is_zero())
    }
}

impl From<&ShortLink> for CacheProjection {
    fn from(link: &ShortLink) -> Self {
        Self {
            url: link.destination.clone(),
            track_clicks: link.track_clicks,
            expire_at: link.expire_at,
        }
    }
}
