//! Link store implementations.
//!
//! - [`PgLinkRepository`] - PostgreSQL via SQLx
//! - [`MemoryLinkRepository`] - Concurrent in-process map

pub mod memory_link_repository;
pub mod pg_link_repository;

pub use memory_link_repository::MemoryLinkRepository;
pub use pg_link_repository::PgLinkRepository;
