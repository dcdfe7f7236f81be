pub mod docx;
pub mod handlers;
pub mod html;
pub mod pdf;
pub mod store;
pub mod template;
#[cfg(test)]
pub(crate) mod testdata;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::models::resume::Resume;
use crate::render::pdf::PdfConverter;
use crate::render::template::TemplateId;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("No HTML-to-PDF converter is installed (looked for wkhtmltopdf)")]
    ConverterUnavailable,

    #[error("PDF conversion failed ({status}): {stderr}")]
    ConversionFailed { status: String, stderr: String },

    #[error("Converter produced an empty document")]
    EmptyOutput,

    #[error("DOCX generation failed: {0}")]
    Docx(String),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Pdf,
    Docx,
    Html,
}

impl DocumentFormat {
    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Html => "html",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "application/pdf",
            DocumentFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            DocumentFormat::Html => "text/html; charset=utf-8",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "html" => Ok(DocumentFormat::Html),
            other => Err(format!(
                "Unknown format '{other}'; expected one of: pdf, docx, html"
            )),
        }
    }
}

/// A finished document ready to be downloaded or stored.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub format: DocumentFormat,
    pub file_name: String,
}

/// Turns a resume into a downloadable document in one of the supported formats.
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    pdf: PdfConverter,
}

impl DocumentRenderer {
    pub fn new(wkhtmltopdf_path: Option<PathBuf>) -> Self {
        Self {
            pdf: PdfConverter::new(wkhtmltopdf_path),
        }
    }

    pub async fn render(
        &self,
        resume: &Resume,
        template: TemplateId,
        format: DocumentFormat,
    ) -> Result<RenderedDocument, RenderError> {
        let bytes = match format {
            DocumentFormat::Html => html::render_html(resume, template)?.into_bytes(),
            DocumentFormat::Docx => docx::render_docx(resume, template)?,
            DocumentFormat::Pdf => {
                let markup = html::render_html(resume, template)?;
                self.pdf.convert(&markup).await?
            }
        };

        let file_name = artifact_file_name(&resume.personal_info.name, format, Utc::now());
        info!(
            "Rendered {} ({} bytes, template {template})",
            file_name,
            bytes.len()
        );

        Ok(RenderedDocument {
            bytes,
            format,
            file_name,
        })
    }
}

/// `<Name_With_Underscores>_Resume_<YYYYmmdd_HHMMSS>.<ext>`. Characters that
/// are unsafe in a file name or header are dropped; an empty name becomes
/// "Resume".
pub fn artifact_file_name(name: &str, format: DocumentFormat, at: DateTime<Utc>) -> String {
    let stem = name
        .split_whitespace()
        .map(|part| {
            part.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '.')
                .collect::<String>()
        })
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    let stem = if stem.is_empty() {
        "Resume".to_string()
    } else {
        format!("{stem}_Resume")
    };

    format!(
        "{stem}_{}.{}",
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}
