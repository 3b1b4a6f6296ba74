//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use crate::application::services::ResolutionService;

/// State shared by all handlers.
///
/// Cheap to clone: the engine sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub resolution_service: Arc<ResolutionService>,
    /// Public prefix of short links, without trailing slash.
    pub base_url: Arc<str>,
}

impl AppState {
    pub fn new(resolution_service: Arc<ResolutionService>, base_url: &str) -> Self {
        Self {
            resolution_service,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }

    /// Builds the public short link for `slug`.
    pub fn short_link(&self, slug: &str) -> String {
        format!("{}/{}", self.base_url, slug)
    }
}
