//! Axum route handlers for AI analysis.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::history::{list_analyses, record_analysis};
use crate::analysis::suggestions::apply_suggestions;
use crate::analysis::AnalysisResult;
use crate::errors::AppError;
use crate::form::collect;
use crate::form::models::ResumeForm;
use crate::form::submission::load_resume;
use crate::ingest::handlers::Upload;
use crate::ingest::ParsedResume;
use crate::models::resume::{AnalysisRow, Resume};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub resume: ResumeForm,
    /// Links the stored analysis to a previously submitted resume.
    #[serde(default)]
    pub resume_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis_id: Option<Uuid>,
    pub analysis: AnalysisResult,
}

#[derive(Debug, Serialize)]
pub struct UploadAnalysisResponse {
    pub analysis_id: Option<Uuid>,
    pub parsed: ParsedResume,
    pub resume: Resume,
    pub analysis: AnalysisResult,
}

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub resume: Resume,
    pub analysis: AnalysisResult,
}

#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub resume: Resume,
    pub changes: Vec<String>,
}

pub(crate) async fn persist(
    state: &AppState,
    resume_id: Option<Uuid>,
    analysis: &AnalysisResult,
) -> Result<Option<Uuid>, AppError> {
    match &state.db {
        Some(pool) => Ok(Some(record_analysis(pool, resume_id, analysis).await?.id)),
        None => Ok(None),
    }
}

/// POST /api/v1/analysis
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let resume = collect(req.resume)?;
    // An unknown resume id is rejected before any provider call.
    if let (Some(pool), Some(resume_id)) = (&state.db, req.resume_id) {
        load_resume(pool, resume_id).await?;
    }
    let analysis = state.analyzer.analyze(&resume).await?;
    let analysis_id = persist(&state, req.resume_id, &analysis).await?;
    Ok(Json(AnalysisResponse {
        analysis_id,
        analysis,
    }))
}

/// POST /api/v1/analysis/upload
///
/// Multipart: `resume` file (PDF/DOCX) and optional `job_description`.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadAnalysisResponse>, AppError> {
    let (parsed, job_description) = Upload::from_multipart(multipart).await?.parse().await?;
    let resume = parsed.to_resume(job_description.as_deref());
    let analysis = state.analyzer.analyze(&resume).await?;
    let analysis_id = persist(&state, None, &analysis).await?;
    Ok(Json(UploadAnalysisResponse {
        analysis_id,
        parsed,
        resume,
        analysis,
    }))
}

/// POST /api/v1/analysis/apply
pub async fn handle_apply(Json(req): Json<ApplyRequest>) -> Json<ApplyResponse> {
    let (resume, changes) = apply_suggestions(&req.resume, &req.analysis);
    Json(ApplyResponse { resume, changes })
}

/// GET /api/v1/resumes/:id/analyses
pub async fn handle_list_analyses(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<Vec<AnalysisRow>>, AppError> {
    let pool = state.db.as_ref().ok_or(AppError::PersistenceDisabled)?;
    Ok(Json(list_analyses(pool, resume_id).await?))
}
