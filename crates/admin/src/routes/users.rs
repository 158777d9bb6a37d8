//! Profile listing route handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use tutorconnect_core::{Profile, Role};

use crate::db::users::UserRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Query parameters for the listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Restrict to one role (`parent`, `tutor`, `admin`).
    pub role: Option<Role>,
}

/// List profiles, newest first, optionally filtered by role.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Profile>>, AppError> {
    let profiles = UserRepository::new(state.pool()).list(query.role).await?;
    Ok(Json(profiles))
}
