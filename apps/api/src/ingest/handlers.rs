//! Axum route handlers for resume uploads.

use axum::{extract::Multipart, Json};
use tracing::info;

use crate::errors::AppError;
use crate::ingest::extract::MAX_UPLOAD_BYTES;
use crate::ingest::{parse_document, ParsedResume};

/// Multipart field carrying the document.
pub const RESUME_FIELD: &str = "resume";
/// Optional multipart text field.
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";

/// A resume upload read from a multipart body.
#[derive(Debug)]
pub struct Upload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
    pub job_description: Option<String>,
}

impl Upload {
    /// Reads the `resume` file and optional `job_description` field.
    /// Unknown fields are drained and ignored.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut file: Option<(String, Option<String>, Vec<u8>)> = None;
        let mut job_description = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
        {
            match field.name().unwrap_or("") {
                RESUME_FIELD => {
                    let file_name = field.file_name().unwrap_or("upload").to_string();
                    let content_type = field.content_type().map(str::to_string);
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("Could not read upload: {e}")))?;
                    if data.len() > MAX_UPLOAD_BYTES {
                        return Err(AppError::BadRequest(
                            "File too large. Maximum size is 10MB".to_string(),
                        ));
                    }
                    file = Some((file_name, content_type, data.to_vec()));
                }
                JOB_DESCRIPTION_FIELD => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("Invalid job description: {e}")))?;
                    job_description = Some(text).filter(|t| !t.trim().is_empty());
                }
                _ => {
                    let _ = field.bytes().await;
                }
            }
        }

        let (file_name, content_type, bytes) = file.ok_or_else(|| {
            AppError::BadRequest(format!("Missing '{RESUME_FIELD}' file field"))
        })?;
        if bytes.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
        }

        Ok(Self {
            file_name,
            content_type,
            bytes,
            job_description,
        })
    }

    pub async fn parse(self) -> Result<(ParsedResume, Option<String>), AppError> {
        let parsed = parse_document(
            &self.file_name,
            self.content_type.as_deref(),
            self.bytes,
            self.job_description.as_deref(),
        )
        .await?;
        info!(
            "Parsed {} ({} words, local ATS {})",
            parsed.file_name, parsed.word_count, parsed.local_score.total_score
        );
        Ok((parsed, self.job_description))
    }
}

/// POST /api/v1/parse
pub async fn handle_parse(multipart: Multipart) -> Result<Json<ParsedResume>, AppError> {
    let (parsed, _) = Upload::from_multipart(multipart).await?.parse().await?;
    Ok(Json(parsed))
}
