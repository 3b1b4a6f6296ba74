//! Caller identity supplied by the upstream gateway.
//!
//! Authentication happens in front of this service. The gateway forwards the
//! authenticated user id in the [`PRINCIPAL_HEADER`] header; requests without
//! it are anonymous.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use std::convert::Infallible;

use crate::error::ErrorInfo;

pub const PRINCIPAL_HEADER: &str = "x-authenticated-user";

/// Optional caller identity. Never rejects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Principal(pub Option<String>);

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .headers
            .get(PRINCIPAL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        Ok(Self(user))
    }
}

/// Caller identity that must be present; rejects with `401 Unauthorized`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub String);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = Unauthenticated;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(Principal(user)) = Principal::from_request_parts(parts, state).await;
        user.map(Self).ok_or(Unauthenticated)
    }
}

/// Rejection for requests that reach a user-scoped endpoint anonymously.
#[derive(Debug)]
pub struct Unauthenticated;

impl IntoResponse for Unauthenticated {
    fn into_response(self) -> Response {
        let info = ErrorInfo {
            code: "unauthorized",
            message: "Authentication required".to_string(),
        };
        let body = serde_json::json!({ "error": info });
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}
