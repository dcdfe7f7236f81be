mod analysis;
mod config;
mod db;
mod errors;
mod form;
mod ingest;
mod llm_client;
mod models;
mod presentation;
mod render;
mod routes;
mod state;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::analyzer::{GeminiAnalyzer, ResumeAnalyzer};
use crate::config::{Config, S3Config};
use crate::db::create_pool;
use crate::render::store::{ArtifactStore, LocalArtifactStore, S3ArtifactStore};
use crate::render::DocumentRenderer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting R.E.A.D.M.L. API v{}", env!("CARGO_PKG_VERSION"));

    // PostgreSQL is optional; without it resumes and analyses are not stored
    let db = match &config.database_url {
        Some(url) => Some(create_pool(url).await?),
        None => {
            info!("DATABASE_URL not set, persistence disabled");
            None
        }
    };

    // Rendered documents go to S3 when configured, otherwise to OUTPUT_DIR
    let artifacts: Arc<dyn ArtifactStore> = match &config.s3 {
        Some(s3) => {
            let client = build_s3_client(s3).await;
            info!("S3 artifact store initialized (bucket: {})", s3.bucket);
            Arc::new(S3ArtifactStore::new(client, s3.bucket.clone()))
        }
        None => {
            info!(
                "Local artifact store initialized ({})",
                config.output_dir.display()
            );
            Arc::new(LocalArtifactStore::new(config.output_dir.clone()))
        }
    };

    // A missing key is reported per request, so the other routes keep working
    let analyzer: Arc<dyn ResumeAnalyzer> = Arc::new(GeminiAnalyzer::from_config(&config)?);
    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY not set, AI analysis will be unavailable");
    }
    info!("Analyzer initialized (model: {})", config.gemini_model);

    let renderer = DocumentRenderer::new(config.wkhtmltopdf_path.clone());

    let state = AppState {
        db,
        analyzer,
        renderer,
        artifacts,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(s3: &S3Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &s3.access_key_id,
        &s3.secret_access_key,
        None,
        None,
        "readml-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&s3.endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
