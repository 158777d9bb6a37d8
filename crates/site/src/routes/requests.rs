//! Parent request route handlers.
//!
//! All endpoints require the parent role; ownership of individual requests
//! is enforced again in the repository predicates, so a parent poking at
//! someone else's request ID sees a plain 404.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use tutorconnect_core::{Board, ClassLevel, ParentRequest, RequestId};

use crate::db::requests::{RequestFields, RequestRepository};
use crate::error::AppError;
use crate::middleware::RequireParent;
use crate::state::AppState;

/// Payload for creating or replacing a request.
#[derive(Debug, Deserialize)]
pub struct RequestPayload {
    pub student_name: Option<String>,
    pub board: Board,
    pub class: ClassLevel,
    pub subjects: Vec<String>,
    pub locality: String,
    pub preferred_timings: String,
}

impl RequestPayload {
    /// Validate the free-form parts and convert into repository fields.
    fn into_fields(self) -> Result<RequestFields, AppError> {
        let subjects: Vec<String> = self
            .subjects
            .into_iter()
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();
        if subjects.is_empty() {
            return Err(AppError::Validation(
                "at least one subject is required".to_owned(),
            ));
        }

        let locality = self.locality.trim().to_owned();
        if locality.is_empty() {
            return Err(AppError::Validation("locality is required".to_owned()));
        }

        let student_name = self
            .student_name
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty());

        Ok(RequestFields {
            student_name,
            board: self.board,
            class: self.class,
            subjects,
            locality,
            preferred_timings: self.preferred_timings.trim().to_owned(),
        })
    }
}

/// List the parent's own requests, newest first.
pub async fn list(
    State(state): State<AppState>,
    RequireParent(user): RequireParent,
) -> Result<Json<Vec<ParentRequest>>, AppError> {
    let requests = RequestRepository::new(state.pool())
        .list_by_parent(user.id)
        .await?;
    Ok(Json(requests))
}

/// Post a new requirement.
pub async fn create(
    State(state): State<AppState>,
    RequireParent(user): RequireParent,
    Json(payload): Json<RequestPayload>,
) -> Result<(StatusCode, Json<ParentRequest>), AppError> {
    let fields = payload.into_fields()?;
    let request = RequestRepository::new(state.pool())
        .create(user.id, &fields)
        .await?;

    tracing::info!(request_id = %request.id, parent_id = %user.id, "requirement posted");
    Ok((StatusCode::CREATED, Json(request)))
}

/// Replace an owned request.
pub async fn update(
    State(state): State<AppState>,
    RequireParent(user): RequireParent,
    Path(id): Path<RequestId>,
    Json(payload): Json<RequestPayload>,
) -> Result<Json<ParentRequest>, AppError> {
    let fields = payload.into_fields()?;
    let request = RequestRepository::new(state.pool())
        .update(id, user.id, &fields)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => {
                AppError::NotFound(format!("request {id}"))
            }
            other => AppError::Database(other),
        })?;

    Ok(Json(request))
}

/// Delete an owned request.
pub async fn delete(
    State(state): State<AppState>,
    RequireParent(user): RequireParent,
    Path(id): Path<RequestId>,
) -> Result<StatusCode, AppError> {
    let deleted = RequestRepository::new(state.pool())
        .delete(id, user.id)
        .await?;

    if deleted {
        tracing::info!(request_id = %id, parent_id = %user.id, "requirement deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("request {id}")))
    }
}
