//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::api::middleware::Principal;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/landing",
///   "slug": "promo2025",                  // optional, 8-16 alphanumeric
///   "expiration": "2026-12-31T23:59:59Z", // optional
///   "utms": { "source": "newsletter" },   // optional
///   "trackClicks": true                   // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "slug": "promo2025",
///   "shortLink": "https://sho.rt/promo2025",
///   "destination": "https://example.com/landing?utm_source=newsletter",
///   "expiration": "2026-12-31T23:59:59Z"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request` - invalid URL, slug or expiration
/// - `409 Conflict` - custom slug already taken
/// - `504 Gateway Timeout` - store did not answer in time
pub async fn shorten_handler(
    State(state): State<AppState>,
    Principal(user): Principal,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let created = state
        .resolution_service
        .create(payload.into_create_request(user.clone()))
        .await?;

    info!(slug = %created.slug, user = ?user, "Shortened URL");

    let short_link = state.short_link(&created.slug);
    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse::new(created, short_link)),
    ))
}
