//! Authentication extractor for the admin panel.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use crate::models::{CurrentAdmin, session_keys};

/// Error returned when admin authentication is required but missing.
pub struct AdminAuthRejection;

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Admin login required" })),
        )
            .into_response()
    }
}

/// Extractor that requires an authenticated admin.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.name)
/// }
/// ```
pub struct RequireAdmin(pub CurrentAdmin);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // The session is inserted into extensions by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminAuthRejection)?;

        let admin: CurrentAdmin = session
            .get(session_keys::CURRENT_ADMIN)
            .await
            .ok()
            .flatten()
            .ok_or(AdminAuthRejection)?;

        Ok(Self(admin))
    }
}

/// Helper to set the current admin in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}

/// Helper to clear the current admin from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_admin(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await?;
    Ok(())
}
