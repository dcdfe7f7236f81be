//! Axum route handlers for the HTML pages and report downloads.

use askama::Template;
use axum::{
    extract::{Multipart, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use chrono::Local;
use serde::Deserialize;
use tracing::{info, warn};

use crate::analysis::handlers::persist;
use crate::analysis::AnalysisResult;
use crate::errors::AppError;
use crate::ingest::handlers::Upload;
use crate::presentation::pages::{ErrorPage, IndexPage, ResultsPage};
use crate::presentation::report::{build_report, report_file_name};
use crate::state::AppState;

const DEFAULT_SUBJECT: &str = "Not specified";

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub analysis: AnalysisResult,
    #[serde(default)]
    pub subject: Option<String>,
}

/// Fields posted by the hidden form on the results page.
#[derive(Debug, Deserialize)]
pub struct ReportForm {
    /// `AnalysisResult` as JSON.
    pub analysis: String,
    #[serde(default)]
    pub subject: Option<String>,
}

/// GET /
pub async fn handle_index() -> Result<Html<String>, AppError> {
    Ok(Html(IndexPage {}.render()?))
}

/// POST /analyze
///
/// Upload errors render an error page. An AI failure does not: the local
/// results are still shown alongside the failure message. A successful
/// analysis is recorded when a database is configured.
pub async fn handle_analyze_page(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let parsed = match Upload::from_multipart(multipart).await {
        Ok(upload) => upload.parse().await,
        Err(e) => Err(e),
    };
    let (parsed, job_description) = match parsed {
        Ok(ok) => ok,
        Err(e) => {
            warn!("Upload rejected: {e}");
            let message = e.user_message();
            let page = ErrorPage { message: &message }.render()?;
            return Ok((status_for(&e), Html(page)).into_response());
        }
    };

    let resume = parsed.to_resume(job_description.as_deref());
    let analysis = state.analyzer.analyze(&resume).await.map_err(|e| {
        warn!("AI analysis failed: {e}");
        e.user_message()
    });

    if let Ok(a) = &analysis {
        // The page is still shown when the history store is down.
        match persist(&state, None, a).await {
            Ok(Some(id)) => info!("Stored analysis {id} for {}", parsed.file_name),
            Ok(None) => {}
            Err(e) => warn!("Could not store analysis: {e}"),
        }
    }

    let page = ResultsPage::new(
        &parsed,
        &resume.summary.target_role,
        analysis.as_ref().map_err(String::as_str),
    )
    .render()?;
    Ok(Html(page).into_response())
}

/// POST /report
pub async fn handle_report_form(Form(form): Form<ReportForm>) -> Result<Response, AppError> {
    let analysis: AnalysisResult = serde_json::from_str(&form.analysis)
        .map_err(|e| AppError::BadRequest(format!("Invalid analysis payload: {e}")))?;
    report_response(&analysis, form.subject.as_deref())
}

/// POST /api/v1/analysis/report
pub async fn handle_report_json(Json(req): Json<ReportRequest>) -> Result<Response, AppError> {
    report_response(&req.analysis, req.subject.as_deref())
}

fn report_response(analysis: &AnalysisResult, subject: Option<&str>) -> Result<Response, AppError> {
    let now = Local::now();
    let subject = subject
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SUBJECT);
    let body = build_report(analysis, subject, now);

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        report_file_name(now)
    ))
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid file name header: {e}")))?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::UnsupportedMedia(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        AppError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
