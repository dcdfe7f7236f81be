use std::sync::Arc;

use sqlx::PgPool;

use crate::analysis::analyzer::ResumeAnalyzer;
use crate::config::Config;
use crate::render::store::ArtifactStore;
use crate::render::DocumentRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when `DATABASE_URL` is unset; storage routes then answer 501.
    pub db: Option<PgPool>,
    /// Pluggable analyzer. Default: GeminiAnalyzer.
    pub analyzer: Arc<dyn ResumeAnalyzer>,
    pub renderer: DocumentRenderer,
    /// Local directory or S3, depending on configuration.
    pub artifacts: Arc<dyn ArtifactStore>,
    pub config: Config,
}
