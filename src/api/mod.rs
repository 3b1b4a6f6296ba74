//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into engine operations and maps the
//! outcomes to status codes. It holds no business rules.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Caller identity and request tracing
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
