//! Server-rendered HTML pages. Kept deliberately plain: one upload form and
//! one results page.

use askama::Template;

use crate::analysis::AnalysisResult;
use crate::ingest::ParsedResume;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage<'a> {
    pub message: &'a str,
}

/// Results for an uploaded resume. The local score is always shown; the AI
/// section shows either the analysis or the reason it is unavailable.
#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsPage<'a> {
    parsed: &'a ParsedResume,
    subject: &'a str,
    analysis: Option<&'a AnalysisResult>,
    ai_error: &'a str,
    /// The analysis as JSON, posted back by the report download form.
    payload: String,
}

impl<'a> ResultsPage<'a> {
    pub fn new(
        parsed: &'a ParsedResume,
        subject: &'a str,
        analysis: Result<&'a AnalysisResult, &'a str>,
    ) -> Self {
        let (analysis, ai_error) = match analysis {
            Ok(a) => (Some(a), ""),
            Err(message) => (None, message),
        };
        let payload = analysis
            .and_then(|a| serde_json::to_string(a).ok())
            .unwrap_or_default();
        Self {
            parsed,
            subject,
            analysis,
            ai_error,
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ScoreBreakdown;
    use chrono::Utc;

    fn parsed() -> ParsedResume {
        ParsedResume::from_text(
            "cv.pdf",
            "Jane Doe\nSkills\nPython, Docker\n".to_string(),
            None,
        )
    }

    #[test]
    fn test_index_page_has_upload_form() {
        let html = IndexPage {}.render().unwrap();
        assert!(html.contains("action=\"/analyze\""));
        assert!(html.contains("name=\"resume\""));
        assert!(html.contains("name=\"job_description\""));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let html = ErrorPage {
            message: "Unsupported file type a<b>.txt",
        }
        .render()
        .unwrap();
        assert!(html.contains("a&lt;b&gt;.txt"));
    }

    #[test]
    fn test_results_page_shows_ai_failure_and_local_score() {
        let parsed = parsed();
        let html = ResultsPage::new(&parsed, "Not specified", Err("Rate limit <exceeded>"))
            .render()
            .unwrap();
        assert!(html.contains(&format!("{}/100", parsed.local_score.total_score)));
        assert!(html.contains("Rate limit &lt;exceeded&gt;"));
        assert!(!html.contains("Download Analysis Report"));
    }

    #[test]
    fn test_results_page_shows_analysis() {
        let analysis = AnalysisResult {
            ats_score: 64.0,
            score_breakdown: ScoreBreakdown {
                keyword_relevance: 22.0,
                role_alignment: 15.0,
                skills_match: 18.0,
                format_quality: 12.0,
                education_match: 7.0,
            },
            suggestions: vec!["Add metrics".into()],
            keyword_gaps: vec!["Kubernetes".into()],
            found_keywords: vec![],
            profile_analysis: "Solid \"summary\"".into(),
            skills_analysis: "More cloud".into(),
            model: "gemini-test".into(),
            generated_at: Utc::now(),
        };
        let parsed = parsed();
        let html = ResultsPage::new(&parsed, "Backend", Ok(&analysis))
            .render()
            .unwrap();
        assert!(html.contains("64/100"));
        assert!(html.contains("<li>Add metrics</li>"));
        assert!(html.contains("Solid &quot;summary&quot;"));
        assert!(html.contains("<td>Keyword Relevance</td><td>22/30</td>"));
        assert!(html.contains("<td>Education Match</td><td>7/10</td>"));
        assert!(!html.contains("value=\"{\"ats_score\""));
        assert!(html.contains("Download Analysis Report"));
    }
}
