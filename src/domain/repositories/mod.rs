//! Repository trait definitions for the domain layer.
//!
//! - [`LinkRepository`] - The durable record store contract
//!
//! Implementations live in `crate::infrastructure::persistence`; a mock is
//! generated via `mockall` for unit tests.

pub mod link_repository;

pub use link_repository::{LinkRepository, OwnerQuery};

#[cfg(test)]
pub use link_repository::MockLinkRepository;
