//! Axum route handlers for document generation.

use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{AppError, FieldError};
use crate::form::collect;
use crate::form::models::ResumeForm;
use crate::render::template::{TemplateId, TemplateInfo};
use crate::render::DocumentFormat;
use crate::state::AppState;

pub const ARTIFACT_LOCATION_HEADER: &str = "x-artifact-location";

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub resume: ResumeForm,
    /// Defaults to `modern`.
    #[serde(default)]
    pub template: Option<String>,
    /// Defaults to `pdf`.
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    pub templates: Vec<TemplateInfo>,
    pub default: TemplateId,
}

/// POST /api/v1/render
///
/// Validates the form, renders it, stores a copy in the artifact store and
/// returns the document as an attachment.
pub async fn handle_render(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Result<Response, AppError> {
    let mut errors = Vec::new();
    let template = match req.template.as_deref() {
        None => TemplateId::default(),
        Some(raw) => raw.parse().unwrap_or_else(|msg: String| {
            errors.push(FieldError::new("template", msg));
            TemplateId::default()
        }),
    };
    let format = match req.format.as_deref() {
        None => DocumentFormat::default(),
        Some(raw) => raw.parse().unwrap_or_else(|msg: String| {
            errors.push(FieldError::new("format", msg));
            DocumentFormat::default()
        }),
    };
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let resume = collect(req.resume)?;
    let doc = state.renderer.render(&resume, template, format).await?;
    let location = state.artifacts.put(&doc).await?;
    info!("Generated {} for {}", doc.file_name, resume.personal_info.name);

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        doc.file_name
    ))
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid file name header: {e}")))?;
    let location = HeaderValue::from_str(&location)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid location header: {e}")))?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(doc.format.content_type()),
            ),
            (header::CONTENT_DISPOSITION, disposition),
            (HeaderName::from_static(ARTIFACT_LOCATION_HEADER), location),
        ],
        doc.bytes,
    )
        .into_response())
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<TemplatesResponse> {
    Json(TemplatesResponse {
        templates: TemplateId::ALL.iter().map(|t| t.info()).collect(),
        default: TemplateId::default(),
    })
}
