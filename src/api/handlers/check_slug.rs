//! Handler for slug availability checks.

use axum::{Json, extract::State};

use crate::api::dto::check_slug::{CheckSlugRequest, CheckSlugResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Reports whether a custom slug can still be used.
///
/// # Endpoint
///
/// `POST /api/check-slug`
///
/// # Response
///
/// ```json
/// { "available": false, "message": "Slug is already taken" }
/// ```
///
/// # Errors
///
/// Returns `400 Bad Request` if the slug is not a valid custom slug.
pub async fn check_slug_handler(
    State(state): State<AppState>,
    Json(payload): Json<CheckSlugRequest>,
) -> Result<Json<CheckSlugResponse>, AppError> {
    let availability = state
        .resolution_service
        .check_availability(&payload.slug)
        .await?;

    Ok(Json(availability.into()))
}
