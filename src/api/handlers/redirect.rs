//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::domain::entities::RedirectDecision;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a slug to its destination.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// # Responses
///
/// - `301 Moved Permanently` - link without expiration
/// - `302 Found` - link with a future expiration
/// - `410 Gone` - link expired
/// - `404 Not Found` - unknown slug
///
/// Tracked links are answered with no-cache headers so that browsers and
/// proxies come back on every visit. The click counter is updated in the
/// background and never delays the response.
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let resolution = state.resolution_service.resolve_for_redirect(&slug).await?;

    let status = match resolution.decision {
        RedirectDecision::Permanent => StatusCode::MOVED_PERMANENTLY,
        RedirectDecision::Temporary => StatusCode::FOUND,
        RedirectDecision::Gone => return Err(AppError::gone(slug)),
        RedirectDecision::NotFound => return Err(AppError::not_found(slug)),
    };

    let destination = resolution
        .destination
        .ok_or_else(|| AppError::internal("Resolved link has no destination"))?;
    let location = HeaderValue::try_from(destination)
        .map_err(|_| AppError::internal("Destination is not a valid header value"))?;

    let mut headers = HeaderMap::new();
    headers.insert(header::LOCATION, location);

    if resolution.track_clicks {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store, no-cache, must-revalidate, proxy-revalidate"),
        );
        headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    }

    Ok((status, headers).into_response())
}
