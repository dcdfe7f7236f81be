// Analysis Client: AI feedback on a resume through the Gemini client.

pub mod analyzer;
pub mod handlers;
pub mod history;
pub mod prompts;
pub mod suggestions;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-criterion ATS points as reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreBreakdown {
    /// 0–30
    pub keyword_relevance: f64,
    /// 0–20
    pub role_alignment: f64,
    /// 0–25
    pub skills_match: f64,
    /// 0–15
    pub format_quality: f64,
    /// 0–10
    pub education_match: f64,
}

/// AI-derived feedback on a resume. Scores and lists are carried exactly as
/// the provider returned them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ats_score: f64,
    #[serde(default)]
    pub score_breakdown: ScoreBreakdown,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub keyword_gaps: Vec<String>,
    #[serde(default)]
    pub found_keywords: Vec<String>,
    #[serde(default)]
    pub profile_analysis: String,
    #[serde(default)]
    pub skills_analysis: String,
    #[serde(default)]
    pub model: String,
    pub generated_at: DateTime<Utc>,
}
