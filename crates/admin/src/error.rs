//! Unified error handling for the admin panel, with Sentry integration.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Client sent a value that failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The entity is not in a state that allows the operation.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Admin is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound("resource".to_owned()),
            RepositoryError::Conflict(msg) => Self::Conflict(msg),
            other => Self::Database(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Database(_)
                | Self::Internal(_)
                | Self::Auth(AuthError::Repository(_))
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::InvalidEmail(_) => StatusCode::UNPROCESSABLE_ENTITY,
                AuthError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) | Self::Internal(_) | Self::Auth(AuthError::Repository(_)) => {
                "Internal server error".to_string()
            }
            Self::Auth(AuthError::InvalidCredentials) => "Invalid credentials".to_string(),
            Self::Auth(AuthError::InvalidEmail(e)) => e.to_string(),
            Self::Validation(msg) | Self::Conflict(msg) => msg.clone(),
            Self::NotFound(what) => format!("Not found: {what}"),
            Self::Unauthorized(_) => "Admin login required".to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_repository_error_mapping() {
        assert_eq!(
            status_of(RepositoryError::NotFound.into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(RepositoryError::Conflict("unlock 5 is already approved".into()).into()),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_auth_error_mapping() {
        assert_eq!(
            status_of(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_conflict_message_reaches_client() {
        let response =
            AppError::Conflict("unlock 5 is already approved".to_owned()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
