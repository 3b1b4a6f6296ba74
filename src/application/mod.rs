//! Application layer: the resolution engine.
//!
//! [`services::ResolutionService`] coordinates the link store and the cache.
//! It is the only place that decides what a slug resolves to; HTTP handlers
//! and the admin CLI are thin adapters around it.

pub mod services;
