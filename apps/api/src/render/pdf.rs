use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, warn};

use crate::render::RenderError;

const BINARY_NAME: &str = "wkhtmltopdf";

/// Install locations checked before falling back to `PATH`.
const COMMON_PATHS: &[&str] = &[
    "/usr/local/bin/wkhtmltopdf",
    "/usr/bin/wkhtmltopdf",
    "/opt/homebrew/bin/wkhtmltopdf",
    "C:\\Program Files\\wkhtmltopdf\\bin\\wkhtmltopdf.exe",
];

/// HTML-to-PDF conversion through an external `wkhtmltopdf` process.
#[derive(Debug, Clone)]
pub struct PdfConverter {
    /// When set, this is the only binary considered.
    configured: Option<PathBuf>,
}

impl PdfConverter {
    pub fn new(configured: Option<PathBuf>) -> Self {
        Self { configured }
    }

    /// Finds the converter binary, or `None` if it is not installed.
    pub fn locate(&self) -> Option<PathBuf> {
        if let Some(path) = &self.configured {
            return path.is_file().then(|| path.clone());
        }

        COMMON_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|p| p.is_file())
            .or_else(|| search_path(BINARY_NAME))
    }

    pub async fn convert(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        let binary = self.locate().ok_or_else(|| {
            warn!("wkhtmltopdf not found; PDF output unavailable");
            RenderError::ConverterUnavailable
        })?;

        let workdir = tempfile::tempdir()?;
        let input = workdir.path().join("resume.html");
        let output = workdir.path().join("resume.pdf");
        tokio::fs::write(&input, html).await?;

        debug!("Running {} on {}", binary.display(), input.display());
        let result = Command::new(&binary)
            .args([
                "--quiet",
                "--page-size",
                "A4",
                "--margin-top",
                "0.5in",
                "--margin-right",
                "0.5in",
                "--margin-bottom",
                "0.5in",
                "--margin-left",
                "0.5in",
                "--encoding",
                "UTF-8",
                "--print-media-type",
                "--enable-local-file-access",
            ])
            .arg(&input)
            .arg(&output)
            .output()
            .await;

        let result = match result {
            Ok(r) => r,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(RenderError::ConverterUnavailable)
            }
            Err(e) => return Err(RenderError::Io(e)),
        };

        if !result.status.success() {
            return Err(RenderError::ConversionFailed {
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        match tokio::fs::read(&output).await {
            Ok(bytes) if !bytes.is_empty() => Ok(bytes),
            Ok(_) => Err(RenderError::EmptyOutput),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(RenderError::EmptyOutput),
            Err(e) => Err(RenderError::Io(e)),
        }
    }
}

fn search_path(binary: &str) -> Option<PathBuf> {
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(binary))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn fake_converter(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("fake-wkhtmltopdf");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn test_configured_path_is_authoritative() {
        let converter = PdfConverter::new(Some(PathBuf::from("/nonexistent/wkhtmltopdf")));
        assert!(converter.locate().is_none());
        let err = converter.convert("<html></html>").await.unwrap_err();
        assert!(matches!(err, RenderError::ConverterUnavailable));
    }

    #[tokio::test]
    async fn test_successful_conversion_returns_output_file() {
        let dir = tempfile::tempdir().unwrap();
        // The output path is the last argument.
        let script = fake_converter(
            &dir,
            "for last; do :; done\nprintf '%%PDF-1.4 fake' > \"$last\"",
        );
        let converter = PdfConverter::new(Some(script));
        let bytes = converter.convert("<html></html>").await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_nonzero_exit_reports_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let script = fake_converter(&dir, "echo 'boom' >&2\nexit 3");
        let converter = PdfConverter::new(Some(script));
        match converter.convert("<html></html>").await.unwrap_err() {
            RenderError::ConversionFailed { stderr, .. } => assert_eq!(stderr, "boom"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_output_is_empty_output() {
        let dir = tempfile::tempdir().unwrap();
        let script = fake_converter(&dir, "exit 0");
        let converter = PdfConverter::new(Some(script));
        let err = converter.convert("<html></html>").await.unwrap_err();
        assert!(matches!(err, RenderError::EmptyOutput));
    }
}
