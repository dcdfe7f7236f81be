use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status plus which optional backends are configured.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "readml-api",
        "ai_configured": state.config.gemini_api_key.is_some(),
        "persistence": state.db.is_some(),
        "artifact_store": if state.config.s3.is_some() { "s3" } else { "local" },
    }))
}
