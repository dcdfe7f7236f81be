use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::ingest::extract::ExtractError;
use crate::llm_client::LlmError;
use crate::render::RenderError;

/// A single failed form field, reported back to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMedia(String),

    #[error("Text extraction failed: {0}")]
    Extraction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("AI provider rate limit exceeded")]
    AiRateLimited,

    #[error("AI service error: {0}")]
    AiService(String),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Persistence is not configured")]
    PersistenceDisabled,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingApiKey => AppError::Configuration(
                "GEMINI_API_KEY is not set; AI analysis is unavailable".to_string(),
            ),
            LlmError::RateLimited => AppError::AiRateLimited,
            other => AppError::AiService(other.to_string()),
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::Render(RenderError::Template(err))
    }
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Unsupported(what) => AppError::UnsupportedMedia(what),
            other => AppError::Extraction(other.to_string()),
        }
    }
}

impl AppError {
    /// Short user-facing message, safe to show on an HTML page.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(errors) => errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
            AppError::Configuration(_) => {
                "AI analysis is unavailable: the API key is not configured.".to_string()
            }
            AppError::AiRateLimited => {
                "Rate limit exceeded. Please wait a few minutes before trying again.".to_string()
            }
            AppError::AiService(_) => {
                "The AI service could not be reached. Please try again later.".to_string()
            }
            AppError::Render(RenderError::ConverterUnavailable) => {
                "PDF generation is unavailable: wkhtmltopdf is not installed.".to_string()
            }
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::UnsupportedMedia(msg)
            | AppError::Extraction(msg) => msg.clone(),
            _ => "An internal server error occurred".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "One or more required fields are missing".to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::UnsupportedMedia(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA_TYPE",
                msg.clone(),
            ),
            AppError::Extraction(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_ERROR",
                msg.clone(),
            ),
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "CONFIGURATION_ERROR",
                    msg.clone(),
                )
            }
            AppError::AiRateLimited => {
                tracing::warn!("AI provider rate limited the request");
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    "AI_RATE_LIMITED",
                    self.user_message(),
                )
            }
            AppError::AiService(msg) => {
                tracing::error!("AI service error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "AI_SERVICE_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Render(RenderError::ConverterUnavailable) => {
                tracing::error!("PDF converter unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "CONVERTER_UNAVAILABLE",
                    self.user_message(),
                )
            }
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    "The document could not be generated".to_string(),
                )
            }
            AppError::PersistenceDisabled => (
                StatusCode::NOT_IMPLEMENTED,
                "PERSISTENCE_DISABLED",
                "Resume storage is not configured on this server".to_string(),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let AppError::Validation(details) = &self {
            error["details"] = json!(details);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
