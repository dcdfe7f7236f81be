use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::analysis::prompts::{
    fill_prompt, ATS_EVALUATION_PROMPT, PROFILE_REVIEW_PROMPT, REVIEWER_SYSTEM,
    SKILLS_REVIEW_PROMPT,
};
use crate::analysis::{AnalysisResult, ScoreBreakdown};
use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, REVIEW_FORMAT_INSTRUCTION};
use crate::llm_client::{GeminiClient, LlmError};
use crate::models::resume::Resume;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Produces an `AnalysisResult` for a resume. Implement this to swap the AI
/// backend without touching handlers.
///
/// Carried in `AppState` as `Arc<dyn ResumeAnalyzer>`.
#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze(&self, resume: &Resume) -> Result<AnalysisResult, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// GeminiAnalyzer: three sequential provider calls
// ────────────────────────────────────────────────────────────────────────────

/// Runs the profile review, the skills review and the ATS evaluation in that
/// order, pausing between calls to stay under the provider's rate limit.
/// Any failure aborts the analysis; nothing is retried.
pub struct GeminiAnalyzer {
    client: GeminiClient,
    call_spacing: Duration,
}

/// The score is required: a reply without one is a parse error, never a zero.
#[derive(Debug, Deserialize)]
struct AtsEvaluation {
    ats_score: f64,
    #[serde(default)]
    score_breakdown: ScoreBreakdown,
    #[serde(default)]
    found_keywords: Vec<String>,
    #[serde(default)]
    missing_keywords: Vec<String>,
    #[serde(default)]
    suggestions: Vec<String>,
}

impl GeminiAnalyzer {
    pub fn new(client: GeminiClient, call_spacing: Duration) -> Self {
        Self {
            client,
            call_spacing,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        Ok(Self::new(
            GeminiClient::from_config(config)?,
            Duration::from_millis(config.analysis_call_spacing_ms),
        ))
    }

    async fn pause(&self) {
        if !self.call_spacing.is_zero() {
            tokio::time::sleep(self.call_spacing).await;
        }
    }
}

#[async_trait]
impl ResumeAnalyzer for GeminiAnalyzer {
    async fn analyze(&self, resume: &Resume) -> Result<AnalysisResult, AppError> {
        if !self.client.has_api_key() {
            return Err(LlmError::MissingApiKey.into());
        }

        let target_role = target_role(resume);
        let skills = &resume.skills;

        let core_skills = skills
            .programming
            .iter()
            .chain(&skills.frameworks)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        let summary = resume.summary.bullets.join("\n");
        let profile_prompt = fill_prompt(
            PROFILE_REVIEW_PROMPT,
            &[
                ("target_role", target_role),
                ("summary", summary.as_str()),
                ("skills", core_skills.as_str()),
                ("format", REVIEW_FORMAT_INSTRUCTION),
            ],
        );
        let profile_analysis = self.client.call_text(&profile_prompt, REVIEWER_SYSTEM).await?;

        self.pause().await;

        let programming = skills.programming.join(", ");
        let frameworks = skills.frameworks.join(", ");
        let other = skills.other.join(", ");
        let skills_prompt = fill_prompt(
            SKILLS_REVIEW_PROMPT,
            &[
                ("target_role", target_role),
                ("programming", programming.as_str()),
                ("frameworks", frameworks.as_str()),
                ("other", other.as_str()),
                ("format", REVIEW_FORMAT_INSTRUCTION),
            ],
        );
        let skills_analysis = self.client.call_text(&skills_prompt, REVIEWER_SYSTEM).await?;

        self.pause().await;

        let resume_text = resume.plain_text();
        let ats_prompt = fill_prompt(
            ATS_EVALUATION_PROMPT,
            &[
                ("target_role", target_role),
                ("resume_text", resume_text.as_str()),
            ],
        );
        let ats: AtsEvaluation = self.client.call_json(&ats_prompt, JSON_ONLY_SYSTEM).await?;

        info!(
            "Analysis complete for '{}': ATS {} ({} suggestions, {} keyword gaps)",
            target_role,
            ats.ats_score,
            ats.suggestions.len(),
            ats.missing_keywords.len()
        );

        Ok(AnalysisResult {
            ats_score: ats.ats_score,
            score_breakdown: ats.score_breakdown,
            suggestions: ats.suggestions,
            keyword_gaps: ats.missing_keywords,
            found_keywords: ats.found_keywords,
            profile_analysis,
            skills_analysis,
            model: self.client.model().to_string(),
            generated_at: Utc::now(),
        })
    }
}

fn target_role(resume: &Resume) -> &str {
    let role = resume.summary.target_role.trim();
    if role.is_empty() {
        "Not specified"
    } else {
        role
    }
}
