pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::form::handlers as form;
use crate::ingest::extract::MAX_UPLOAD_BYTES;
use crate::ingest::handlers as ingest;
use crate::presentation::handlers as pages;
use crate::render::handlers as render;
use crate::state::AppState;

/// Multipart framing and the job description ride on top of the file itself.
const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = || DefaultBodyLimit::max(UPLOAD_BODY_LIMIT);

    Router::new()
        .route("/health", get(health::health_handler))
        // HTML pages
        .route("/", get(pages::handle_index))
        .route(
            "/analyze",
            post(pages::handle_analyze_page).layer(upload_limit()),
        )
        .route("/report", post(pages::handle_report_form))
        // Form collection
        .route("/api/v1/resumes/validate", post(form::handle_validate))
        .route("/api/v1/resumes", post(form::handle_submit))
        .route("/api/v1/resumes/:id", get(form::handle_get_resume))
        .route(
            "/api/v1/resumes/:id/analyses",
            get(analysis::handle_list_analyses),
        )
        // Document rendering
        .route("/api/v1/render", post(render::handle_render))
        .route("/api/v1/templates", get(render::handle_list_templates))
        // Uploads
        .route(
            "/api/v1/parse",
            post(ingest::handle_parse).layer(upload_limit()),
        )
        // AI analysis
        .route("/api/v1/analysis", post(analysis::handle_analyze))
        .route(
            "/api/v1/analysis/upload",
            post(analysis::handle_analyze_upload).layer(upload_limit()),
        )
        .route("/api/v1/analysis/apply", post(analysis::handle_apply))
        .route("/api/v1/analysis/report", post(pages::handle_report_json))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use chrono::Utc;
    use serde_json::{json, Value};
    use sqlx::postgres::{PgPool, PgPoolOptions};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::analyzer::ResumeAnalyzer;
    use crate::analysis::{AnalysisResult, ScoreBreakdown};
    use crate::config::Config;
    use crate::errors::AppError;
    use crate::models::resume::Resume;
    use crate::render::docx::render_docx;
    use crate::render::handlers::ARTIFACT_LOCATION_HEADER;
    use crate::render::store::LocalArtifactStore;
    use crate::render::template::TemplateId;
    use crate::render::testdata::complete_resume;
    use crate::render::DocumentRenderer;

    /// Returns a fixed analysis, or a rate-limit error, and counts calls.
    struct StubAnalyzer {
        fail: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ResumeAnalyzer for StubAnalyzer {
        async fn analyze(&self, _resume: &Resume) -> Result<AnalysisResult, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::AiRateLimited);
            }
            Ok(sample_analysis())
        }
    }

    fn sample_analysis() -> AnalysisResult {
        AnalysisResult {
            ats_score: 77.0,
            score_breakdown: ScoreBreakdown::default(),
            suggestions: vec!["Quantify impact".into()],
            keyword_gaps: vec!["Kubernetes".into()],
            found_keywords: vec!["Rust".into()],
            profile_analysis: "Good profile.".into(),
            skills_analysis: "Good skills.".into(),
            model: "stub".into(),
            generated_at: Utc::now(),
        }
    }

    struct Harness {
        app: Router,
        analyzer: Arc<StubAnalyzer>,
        out: TempDir,
    }

    fn harness(fail: bool) -> Harness {
        harness_with_db(fail, None)
    }

    /// A pool pointing at a closed port: every query fails fast.
    fn unreachable_pool() -> PgPool {
        PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(300))
            .connect_lazy("postgres://readml@127.0.0.1:1/readml")
            .unwrap()
    }

    fn harness_with_db(fail: bool, db: Option<PgPool>) -> Harness {
        let out = TempDir::new().unwrap();
        let analyzer = Arc::new(StubAnalyzer {
            fail,
            calls: AtomicUsize::new(0),
        });
        let state = AppState {
            db,
            analyzer: analyzer.clone(),
            renderer: DocumentRenderer::new(None),
            artifacts: Arc::new(LocalArtifactStore::new(out.path().to_path_buf())),
            config: Config::from_lookup(|_| None).unwrap(),
        };
        Harness {
            app: build_router(state),
            analyzer,
            out,
        }
    }

    fn valid_form() -> Value {
        json!({
            "personal_info": {
                "name": "Grace Hopper",
                "email": "grace@example.com",
                "phone": "555-0100",
                "location": "Arlington, VA"
            },
            "profile_summary": {
                "target_role": "Compiler Engineer",
                "summary": "Built the first compiler\nPopularized machine-independent languages"
            },
            "education": [{ "institution": "Yale", "degree": "PhD Mathematics" }],
            "skills": { "programming": "COBOL, FLOW-MATIC" }
        })
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(uri: &str, file_name: &str, bytes: &[u8]) -> Request<Body> {
        let boundary = "readml-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(
            format!(
                "\r\n--{boundary}\r\nContent-Disposition: form-data; name=\"job_description\"\r\n\r\nRust backend engineer\r\n--{boundary}--\r\n"
            )
            .as_bytes(),
        );
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_str(&body_string(response).await).unwrap()
    }

    fn sample_docx() -> Vec<u8> {
        render_docx(&complete_resume(), TemplateId::default()).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_optional_backends() {
        let h = harness(false);
        let response = h
            .app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["persistence"], false);
        assert_eq!(body["artifact_store"], "local");
    }

    #[tokio::test]
    async fn test_index_page_served() {
        let h = harness(false);
        let response = h
            .app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("action=\"/analyze\""));
    }

    #[tokio::test]
    async fn test_validate_lists_missing_fields_without_rejecting() {
        let h = harness(false);
        let response = h
            .app
            .oneshot(json_request("POST", "/api/v1/resumes/validate", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["valid"], false);
        assert_eq!(body["errors"].as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_submit_without_database_is_not_persisted() {
        let h = harness(false);
        let response = h
            .app
            .oneshot(json_request("POST", "/api/v1/resumes", valid_form()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["persisted"], false);
        assert!(body["resume_id"].is_null());
        assert_eq!(body["resume"]["personal_info"]["name"], "Grace Hopper");
    }

    #[tokio::test]
    async fn test_stored_resume_lookup_without_database() {
        let h = harness(false);
        let response = h
            .app
            .oneshot(
                Request::get("/api/v1/resumes/6f1c1d0e-2b1a-4a4e-9a57-0c9c8f0e3b11")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    }

    #[tokio::test]
    async fn test_render_docx_returns_attachment_and_stores_copy() {
        let h = harness(false);
        let response = h
            .app
            .oneshot(json_request(
                "POST",
                "/api/v1/render",
                json!({ "resume": valid_form(), "template": "classic", "format": "docx" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("Grace_Hopper_Resume_"));
        assert!(disposition.ends_with(".docx\""));
        let location = response.headers()[ARTIFACT_LOCATION_HEADER]
            .to_str()
            .unwrap()
            .to_string();
        assert!(location.starts_with(&h.out.path().display().to_string()));
        assert!(std::path::Path::new(&location).exists());
    }

    #[tokio::test]
    async fn test_render_rejects_unknown_format_and_template() {
        let h = harness(false);
        let response = h
            .app
            .oneshot(json_request(
                "POST",
                "/api/v1/render",
                json!({ "resume": valid_form(), "template": "fancy", "format": "odt" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        let fields: Vec<&str> = body["error"]["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["template", "format"]);
    }

    #[tokio::test]
    async fn test_analysis_with_incomplete_form_never_calls_provider() {
        let h = harness(false);
        let response = h
            .app
            .oneshot(json_request(
                "POST",
                "/api/v1/analysis",
                json!({ "resume": {} }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(h.analyzer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_analysis_returns_result_without_id_when_not_persisted() {
        let h = harness(false);
        let response = h
            .app
            .oneshot(json_request(
                "POST",
                "/api/v1/analysis",
                json!({ "resume": valid_form() }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["analysis_id"].is_null());
        assert_eq!(body["analysis"]["ats_score"], 77.0);
        assert_eq!(h.analyzer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_analysis_checks_resume_id_before_calling_provider() {
        let h = harness_with_db(false, Some(unreachable_pool()));
        let response = h
            .app
            .oneshot(json_request(
                "POST",
                "/api/v1/analysis",
                json!({
                    "resume": valid_form(),
                    "resume_id": "6f1c1d0e-2b1a-4a4e-9a57-0c9c8f0e3b11"
                }),
            ))
            .await
            .unwrap();
        assert_ne!(response.status(), StatusCode::OK);
        assert_eq!(h.analyzer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_analysis_rate_limit_surfaces_as_429() {
        let h = harness(true);
        let response = h
            .app
            .oneshot(json_request(
                "POST",
                "/api/v1/analysis",
                json!({ "resume": valid_form() }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_parse_upload_extracts_sections() {
        let h = harness(false);
        let response = h
            .app
            .oneshot(multipart_request("/api/v1/parse", "cv.docx", &sample_docx()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["file_name"], "cv.docx");
        assert!(body["full_text"].as_str().unwrap().contains("Ada Lovelace"));
    }

    #[tokio::test]
    async fn test_upload_rejects_unsupported_type() {
        let h = harness(false);
        let response = h
            .app
            .oneshot(multipart_request(
                "/api/v1/analysis/upload",
                "cv.txt",
                b"plain text resume",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(h.analyzer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_analyze_page_shows_ai_result() {
        let h = harness(false);
        let response = h
            .app
            .oneshot(multipart_request("/analyze", "cv.docx", &sample_docx()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("77/100"));
        assert!(html.contains("Download Analysis Report"));
    }

    #[tokio::test]
    async fn test_analyze_page_records_analysis_without_blocking_on_storage() {
        let h = harness_with_db(false, Some(unreachable_pool()));
        let response = h
            .app
            .oneshot(multipart_request("/analyze", "cv.docx", &sample_docx()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("77/100"));
        assert!(html.contains("Keyword Relevance"));
        assert_eq!(h.analyzer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_analyze_page_keeps_local_results_when_ai_fails() {
        let h = harness(true);
        let response = h
            .app
            .oneshot(multipart_request("/analyze", "cv.docx", &sample_docx()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("ATS Compatibility (local check)"));
        assert!(html.contains("Rate limit exceeded"));
    }

    #[tokio::test]
    async fn test_analyze_page_renders_error_for_bad_upload() {
        let h = harness(false);
        let response = h
            .app
            .oneshot(multipart_request("/analyze", "cv.png", b"\x89PNG"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(body_string(response).await.contains("Error during analysis"));
    }

    #[tokio::test]
    async fn test_report_download_from_json() {
        let h = harness(false);
        let response = h
            .app
            .oneshot(json_request(
                "POST",
                "/api/v1/analysis/report",
                json!({ "analysis": sample_analysis(), "subject": "Compiler Engineer" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("AI_Resume_Analysis_"));
        let text = body_string(response).await;
        assert!(text.contains("For: Compiler Engineer"));
        assert!(text.contains("Overall Score: 77/100"));
    }

    #[tokio::test]
    async fn test_report_form_rejects_bad_payload() {
        let h = harness(false);
        let response = h
            .app
            .oneshot(
                Request::post("/report")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("analysis=not-json&subject=x"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_apply_merges_suggestions() {
        let h = harness(false);
        let mut analysis = sample_analysis();
        analysis.profile_analysis =
            "1. Strengths:\nClear\n3. Enhanced Version:\nSeasoned engineer.\n".into();
        let response = h
            .app
            .oneshot(json_request(
                "POST",
                "/api/v1/analysis/apply",
                json!({ "resume": complete_resume(), "analysis": analysis }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(
            body["changes"][0],
            "Updated profile summary with AI-enhanced version"
        );
    }
}
