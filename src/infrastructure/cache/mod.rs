//! Caching layer for fast redirect lookups.
//!
//! [`CacheService`] is the raw key/value contract, with these implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`MemoryCache`] - In-process map with expiry
//! - [`NullCache`] - No-op implementation for disabled caching
//!
//! [`ProjectionCache`] sits on top and is what the engine talks to: it stores
//! typed projections, derives TTLs from expiration and absorbs backend failures.

mod memory_cache;
mod null_cache;
mod projection_cache;
mod redis_cache;
mod service;

pub use memory_cache::MemoryCache;
pub use null_cache::NullCache;
pub use projection_cache::ProjectionCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};

#[cfg(test)]
pub use service::MockCacheService;
