use chrono::{DateTime, Local};

use crate::analysis::AnalysisResult;

/// Plain-text analysis report offered as a download.
pub fn build_report(analysis: &AnalysisResult, subject: &str, at: DateTime<Local>) -> String {
    let b = &analysis.score_breakdown;
    let mut lines = vec![
        "AI Resume Analysis Report".to_string(),
        format!("Generated on: {}", at.format("%Y-%m-%d %H:%M:%S")),
        format!("For: {subject}"),
        format!("Model: {}", analysis.model),
        String::new(),
        "=== Profile Summary Analysis ===".to_string(),
        analysis.profile_analysis.trim_end().to_string(),
        String::new(),
        "=== Skills Analysis ===".to_string(),
        analysis.skills_analysis.trim_end().to_string(),
        String::new(),
        "=== ATS Optimization ===".to_string(),
        format!("Overall Score: {}/100", analysis.ats_score),
        format!("Keyword Relevance: {}/30", b.keyword_relevance),
        format!("Role Alignment: {}/20", b.role_alignment),
        format!("Skills Match: {}/25", b.skills_match),
        format!("Format Quality: {}/15", b.format_quality),
        format!("Education Match: {}/10", b.education_match),
    ];

    if !analysis.found_keywords.is_empty() {
        lines.push(format!("Found Keywords: {}", analysis.found_keywords.join(", ")));
    }
    if !analysis.keyword_gaps.is_empty() {
        lines.push(format!("Missing Keywords: {}", analysis.keyword_gaps.join(", ")));
    }
    if !analysis.suggestions.is_empty() {
        lines.push("Suggestions:".to_string());
        lines.extend(analysis.suggestions.iter().map(|s| format!("• {s}")));
    }

    let mut report = lines.join("\n");
    report.push('\n');
    report
}

pub fn report_file_name(at: DateTime<Local>) -> String {
    format!("AI_Resume_Analysis_{}.txt", at.format("%Y%m%d"))
}
