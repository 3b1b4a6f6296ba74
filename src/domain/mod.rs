//! Domain layer: entities and repository contracts.
//!
//! - [`entities`] - Short link records, cache projections, redirect decisions
//! - [`repositories`] - Store contract implemented by the infrastructure layer
//!
//! The domain layer has no dependency on a concrete store or cache technology.

pub mod entities;
pub mod repositories;
