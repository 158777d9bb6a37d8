//! Authentication extractors.
//!
//! Role checks live here as typed extractors so handlers state their
//! requirement in the signature: a parent-only endpoint takes
//! `RequireParent`, and a tutor hitting it gets a 403 before the handler
//! body runs.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use tutorconnect_core::Role;

use crate::models::{CurrentUser, session_keys};

/// Error returned when a request lacks the required authentication.
pub enum AuthRejection {
    /// No session, or no logged-in user in it.
    Unauthenticated,
    /// Logged in, but with the wrong role for this endpoint.
    WrongRole(Role),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Login required" })),
            )
                .into_response(),
            Self::WrongRole(required) => (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": format!("This action requires a {required} account") })),
            )
                .into_response(),
        }
    }
}

async fn current_user(parts: &mut Parts) -> Result<CurrentUser, AuthRejection> {
    // The session is inserted into extensions by SessionManagerLayer
    let session = parts
        .extensions
        .get::<Session>()
        .ok_or(AuthRejection::Unauthenticated)?;

    session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
        .ok_or(AuthRejection::Unauthenticated)
}

/// Extractor that requires any logged-in user.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireUser(user): RequireUser) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireUser(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        current_user(parts).await.map(Self)
    }
}

/// Extractor that requires a logged-in parent.
pub struct RequireParent(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireParent
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts).await?;
        if user.role == Role::Parent {
            Ok(Self(user))
        } else {
            Err(AuthRejection::WrongRole(Role::Parent))
        }
    }
}

/// Extractor that requires a logged-in tutor.
pub struct RequireTutor(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireTutor
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts).await?;
        if user.role == Role::Tutor {
            Ok(Self(user))
        } else {
            Err(AuthRejection::WrongRole(Role::Tutor))
        }
    }
}

/// Helper to set the current user in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to clear the current user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}
