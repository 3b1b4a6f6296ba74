//! Application error type shared by the engine and the HTTP layer.
//!
//! Every fallible operation of [`crate::application::services::ResolutionService`]
//! returns [`AppError`]. The HTTP layer renders it as a JSON body:
//!
//! ```json
//! { "error": { "code": "slug_conflict", "message": "Slug is already taken" } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Machine-readable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Errors surfaced by link creation, resolution and lookup.
///
/// `NotFound` and `Gone` are terminal outcomes rather than failures; they are
/// carried here so HTTP handlers can map them with `?`.
#[derive(Debug, Error)]
pub enum AppError {
    /// User-correctable input problem. The message is shown verbatim.
    #[error("{message}")]
    Validation { message: String },

    /// Custom slug already exists in the store.
    #[error("Slug is already taken")]
    SlugConflict { slug: String },

    #[error("Slug not found")]
    NotFound { slug: String },

    #[error("This link has expired")]
    Gone { slug: String },

    /// A store or cache call exceeded the per-operation timeout.
    #[error("Operation timed out: {operation}")]
    Timeout { operation: &'static str },

    #[error("Store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(slug: impl Into<String>) -> Self {
        Self::SlugConflict { slug: slug.into() }
    }

    pub fn not_found(slug: impl Into<String>) -> Self {
        Self::NotFound { slug: slug.into() }
    }

    pub fn gone(slug: impl Into<String>) -> Self {
        Self::Gone { slug: slug.into() }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns the HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::SlugConflict { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Gone { .. } => StatusCode::GONE,
            Self::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            Self::StoreUnavailable { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Converts the error into its serializable payload.
    ///
    /// Infrastructure details are not leaked: store and internal failures are
    /// reported with a generic message (the detail is logged where it happens).
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message) = match self {
            Self::Validation { message } => ("validation_error", message.clone()),
            Self::SlugConflict { .. } => ("slug_conflict", self.to_string()),
            Self::NotFound { .. } => ("not_found", self.to_string()),
            Self::Gone { .. } => ("gone", self.to_string()),
            Self::Timeout { .. } => ("timeout", "Request timed out".to_string()),
            Self::StoreUnavailable { .. } => ("internal_error", "Database error".to_string()),
            Self::Internal { message } => ("internal_error", message.clone()),
        };

        ErrorInfo { code, message }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

/// Maps a SQLx error into the application taxonomy.
///
/// A unique-index violation becomes [`AppError::SlugConflict`]; everything else is
/// logged and reported as [`AppError::StoreUnavailable`].
pub fn map_sqlx_error(e: sqlx::Error, slug: &str) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return AppError::conflict(slug);
    }

    tracing::error!(slug = %slug, error = %e, "Database error");
    AppError::store(e.to_string())
}
