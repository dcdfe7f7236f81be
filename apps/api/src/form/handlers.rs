//! Axum route handlers for resume form submission.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::{AppError, FieldError};
use crate::form::collect;
use crate::form::models::ResumeForm;
use crate::form::submission::{load_resume, save_resume};
use crate::form::validation::validate_resume;
use crate::models::resume::Resume;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub valid: bool,
    pub errors: Vec<FieldError>,
    pub resume: Resume,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    /// Present only when a database is configured.
    pub resume_id: Option<Uuid>,
    pub persisted: bool,
    pub resume: Resume,
}

#[derive(Debug, Serialize)]
pub struct StoredResumeResponse {
    pub resume_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub resume: Resume,
}

/// POST /api/v1/resumes/validate
///
/// Reports every missing field without rejecting the request, so a client can
/// highlight fields as the user fills the form.
pub async fn handle_validate(Json(form): Json<ResumeForm>) -> Json<ValidationResponse> {
    let (resume, mut errors) = form.normalize();
    errors.extend(validate_resume(&resume));
    Json(ValidationResponse {
        valid: errors.is_empty(),
        errors,
        resume,
    })
}

/// POST /api/v1/resumes
///
/// Validates the form and, when persistence is configured, stores the resume.
pub async fn handle_submit(
    State(state): State<AppState>,
    Json(form): Json<ResumeForm>,
) -> Result<(StatusCode, Json<SubmitResponse>), AppError> {
    let resume = collect(form)?;

    let resume_id = match &state.db {
        Some(pool) => Some(save_resume(pool, &resume).await?.id),
        None => None,
    };

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            resume_id,
            persisted: resume_id.is_some(),
            resume,
        }),
    ))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<StoredResumeResponse>, AppError> {
    let pool = state.db.as_ref().ok_or(AppError::PersistenceDisabled)?;
    let (row, resume) = load_resume(pool, resume_id).await?;
    Ok(Json(StoredResumeResponse {
        resume_id: row.id,
        created_at: row.created_at,
        resume,
    }))
}
