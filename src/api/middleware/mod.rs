//! HTTP middleware and extractors.
//!
//! Provides caller identity extraction and request tracing.

pub mod principal;
pub mod tracing;

pub use principal::{AuthenticatedUser, Principal};
