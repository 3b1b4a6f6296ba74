//! In-process cache with per-entry expiry.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Every this many writes, expired entries are swept from the whole map.
const SWEEP_INTERVAL: usize = 64;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Cache backed by a sharded concurrent map.
///
/// Expired entries are dropped on read and by a sweep every
/// `SWEEP_INTERVAL` writes. Intended for single-process deployments, the
/// admin CLI and tests.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, Entry>,
    writes: AtomicUsize,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries, including expired ones not yet read or swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let Some(entry) = self.entries.get(key) else {
            return Ok(None);
        };

        if entry.is_expired() {
            drop(entry);
            self.entries.remove_if(key, |_, entry| entry.is_expired());
            return Ok(None);
        }

        Ok(Some(entry.value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        if ttl.is_zero() {
            return Ok(());
        }

        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );

        if (self.writes.fetch_add(1, Ordering::Relaxed) + 1) % SWEEP_INTERVAL == 0 {
            self.entries.retain(|_, entry| !entry.is_expired());
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
