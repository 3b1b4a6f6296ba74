//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{slug}`   - Short link redirect
//! - `GET  /health`   - Health check: store and cache
//! - `/api/*`         - REST API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and the tracing layer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/{slug}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application service: [`router`] behind trailing-slash
/// normalization.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
