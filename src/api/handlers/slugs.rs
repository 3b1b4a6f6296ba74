//! Handler for listing the caller's links.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::slugs::{SlugItem, SlugsQuery, SlugsResponse};
use crate::api::middleware::AuthenticatedUser;
use crate::error::AppError;
use crate::state::AppState;

/// Lists links created by the caller, newest first.
///
/// # Endpoint
///
/// `GET /api/slugs?page=1&size=100&includeExpired=false`
///
/// Missing or non-positive `page` / `size` fall back to 1 and 100.
///
/// # Errors
///
/// Returns `401 Unauthorized` without an authenticated user.
pub async fn slugs_handler(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<SlugsQuery>,
) -> Result<Json<SlugsResponse>, AppError> {
    let links = state
        .resolution_service
        .list_by_owner(
            &user,
            query.pagination.page(),
            query.pagination.size(),
            query.include_expired.unwrap_or(false),
        )
        .await?;

    let slugs = links
        .into_iter()
        .map(|link| {
            let short_link = state.short_link(&link.slug);
            SlugItem::new(link, short_link)
        })
        .collect();

    Ok(Json(SlugsResponse { slugs }))
}
