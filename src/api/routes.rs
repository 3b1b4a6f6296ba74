//! API route configuration.
//!
//! Authentication is performed upstream; user-scoped endpoints read the caller
//! through [`crate::api::middleware::principal`].

use crate::api::handlers::{check_slug_handler, shorten_handler, slugs_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes.
///
/// # Endpoints
///
/// - `POST /shorten`     - Create a short link
/// - `POST /check-slug`  - Check custom slug availability
/// - `GET  /slugs`       - List the caller's links (paginated)
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/check-slug", post(check_slug_handler))
        .route("/slugs", get(slugs_handler))
}
