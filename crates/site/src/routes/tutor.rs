//! Tutor route handlers: teaching profile, matches, and callback requests.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tutorconnect_core::{
    ClassLevel, ClassRange, ContactUnlock, Fee, RequestId, TutorProfile,
};

use crate::db::tutor_profiles::{TutorProfileFields, TutorProfileRepository};
use crate::error::AppError;
use crate::middleware::RequireTutor;
use crate::services::matches::{MatchService, TutorMatch};
use crate::state::AppState;

/// Payload for creating or updating the teaching profile.
#[derive(Debug, Deserialize)]
pub struct TutorProfilePayload {
    pub subjects: Vec<String>,
    pub class_min: ClassLevel,
    pub class_max: ClassLevel,
    pub locality_preferences: Vec<String>,
    pub fee_per_class: Decimal,
    pub available_timings: String,
}

impl TutorProfilePayload {
    fn into_fields(self) -> Result<TutorProfileFields, AppError> {
        let subjects = non_empty_trimmed(self.subjects, "at least one subject is required")?;
        let locality_preferences = non_empty_trimmed(
            self.locality_preferences,
            "at least one locality preference is required",
        )?;

        let class_range =
            ClassRange::new(self.class_min, self.class_max).map_err(AppError::validation)?;
        let fee_per_class = Fee::new(self.fee_per_class).map_err(AppError::validation)?;

        Ok(TutorProfileFields {
            subjects,
            class_range,
            locality_preferences,
            fee_per_class,
            available_timings: self.available_timings.trim().to_owned(),
        })
    }
}

/// Trim a string list and reject it if nothing survives.
fn non_empty_trimmed(values: Vec<String>, message: &str) -> Result<Vec<String>, AppError> {
    let values: Vec<String> = values
        .into_iter()
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect();
    if values.is_empty() {
        return Err(AppError::Validation(message.to_owned()));
    }
    Ok(values)
}

/// Response for a callback request.
#[derive(Debug, Serialize)]
pub struct UnlockResponse {
    /// The unlock row, freshly created or already on file.
    pub unlock: ContactUnlock,
}

/// Get the tutor's own teaching profile.
pub async fn get_profile(
    State(state): State<AppState>,
    RequireTutor(user): RequireTutor,
) -> Result<Json<TutorProfile>, AppError> {
    let profile = TutorProfileRepository::new(state.pool())
        .get_by_tutor(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("tutor profile".to_owned()))?;

    Ok(Json(profile))
}

/// Create or update the teaching profile.
pub async fn upsert_profile(
    State(state): State<AppState>,
    RequireTutor(user): RequireTutor,
    Json(payload): Json<TutorProfilePayload>,
) -> Result<Json<TutorProfile>, AppError> {
    let fields = payload.into_fields()?;
    let profile = TutorProfileRepository::new(state.pool())
        .upsert(user.id, &fields)
        .await?;

    tracing::info!(tutor_id = %user.id, "tutor profile saved");
    Ok(Json(profile))
}

/// List matching requests with unlock state and gated contact details.
pub async fn matches(
    State(state): State<AppState>,
    RequireTutor(user): RequireTutor,
) -> Result<Json<Vec<TutorMatch>>, AppError> {
    let matches = MatchService::new(state.pool())
        .list_for_tutor(user.id, user.city)
        .await?;
    Ok(Json(matches))
}

/// Request a callback for a matched request.
///
/// Returns 201 when this call created the unlock, 200 when an earlier
/// (pending or approved) one already covered it.
pub async fn request_unlock(
    State(state): State<AppState>,
    RequireTutor(user): RequireTutor,
    Path(request_id): Path<RequestId>,
) -> Result<(StatusCode, Json<UnlockResponse>), AppError> {
    let (unlock, created) = MatchService::new(state.pool())
        .request_callback(user.id, user.city, request_id)
        .await?;

    if created {
        tracing::info!(
            unlock_id = %unlock.id,
            tutor_id = %user.id,
            request_id = %request_id,
            "callback requested"
        );
    }

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(UnlockResponse { unlock })))
}
