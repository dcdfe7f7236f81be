use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{0}")]
    Unsupported(String),

    #[error("Could not read PDF: {0}")]
    Pdf(String),

    #[error("Could not read DOCX: {0}")]
    Docx(String),

    #[error("No text could be extracted from the document")]
    NoText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Decides the document kind from the file extension, falling back to the
    /// declared content type.
    pub fn detect(file_name: Option<&str>, content_type: Option<&str>) -> Result<Self, ExtractError> {
        let extension = file_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => return Ok(DocumentKind::Pdf),
            Some("docx") => return Ok(DocumentKind::Docx),
            _ => {}
        }

        match content_type {
            Some("application/pdf") => Ok(DocumentKind::Pdf),
            Some(DOCX_CONTENT_TYPE) => Ok(DocumentKind::Docx),
            _ => Err(ExtractError::Unsupported(format!(
                "Unsupported file type '{}'; upload a PDF or DOCX file",
                file_name.or(content_type).unwrap_or("unknown")
            ))),
        }
    }
}

/// Extracts the plain text of an uploaded document.
pub async fn extract_text(bytes: Vec<u8>, kind: DocumentKind) -> Result<String, ExtractError> {
    let text = match kind {
        DocumentKind::Pdf => {
            // pdf-extract is CPU-bound and can panic on malformed input.
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
                .await
                .map_err(|e| {
                    warn!("PDF extractor aborted: {e}");
                    ExtractError::Pdf("the extractor failed on this file".to_string())
                })?
                .map_err(|e| ExtractError::Pdf(e.to_string()))?
        }
        DocumentKind::Docx => extract_docx_text(&bytes)?,
    };

    if text.trim().is_empty() {
        return Err(ExtractError::NoText);
    }
    debug!("Extracted {} characters from {:?}", text.len(), kind);
    Ok(text)
}

/// One line per paragraph, runs concatenated.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractError::Docx(e.to_string()))?;
    let mut text = String::new();
    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(p) = child {
            for child in p.children {
                if let docx_rs::ParagraphChild::Run(run) = child {
                    for run_child in run.children {
                        if let docx_rs::RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push('\n');
        }
    }
    Ok(text)
}
