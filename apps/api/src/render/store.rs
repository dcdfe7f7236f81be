use std::path::PathBuf;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use tracing::info;

use crate::errors::AppError;
use crate::render::RenderedDocument;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Where rendered documents are kept after download.
///
/// Carried in `AppState` as `Arc<dyn ArtifactStore>`.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Saves the document and returns a location string (path or `s3://` URI).
    async fn put(&self, doc: &RenderedDocument) -> Result<String, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LocalArtifactStore: default, writes into the output directory
// ────────────────────────────────────────────────────────────────────────────

pub struct LocalArtifactStore {
    dir: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn put(&self, doc: &RenderedDocument) -> Result<String, AppError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::Storage(format!("Cannot create {}: {e}", self.dir.display())))?;

        let path = self.dir.join(&doc.file_name);
        tokio::fs::write(&path, &doc.bytes)
            .await
            .map_err(|e| AppError::Storage(format!("Cannot write {}: {e}", path.display())))?;

        info!("Saved {} ({} bytes)", path.display(), doc.bytes.len());
        Ok(path.display().to_string())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// S3ArtifactStore: used when S3 settings are configured
// ────────────────────────────────────────────────────────────────────────────

pub struct S3ArtifactStore {
    client: S3Client,
    bucket: String,
}

impl S3ArtifactStore {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl ArtifactStore for S3ArtifactStore {
    async fn put(&self, doc: &RenderedDocument) -> Result<String, AppError> {
        let key = format!("resumes/{}", doc.file_name);
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(doc.bytes.clone()))
            .content_type(doc.format.content_type())
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

        info!("Uploaded artifact to s3://{}/{}", self.bucket, key);
        Ok(format!("s3://{}/{}", self.bucket, key))
    }
}
