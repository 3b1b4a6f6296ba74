//! Business logic services for the application layer.

pub mod resolution_service;

pub use resolution_service::{
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE, EngineConfig, HealthReport, ResolutionService,
};
