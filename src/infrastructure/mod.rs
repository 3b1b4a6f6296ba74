//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence and caching.
//!
//! # Modules
//!
//! - [`cache`] - Cache backends (Redis, in-memory, no-op) and the projection cache
//! - [`persistence`] - PostgreSQL and in-memory link stores

pub mod cache;
pub mod persistence;
