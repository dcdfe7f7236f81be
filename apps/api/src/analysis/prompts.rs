// All LLM prompt constants for the Analysis module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Substitutes `{name}` placeholders in a single pass over `template`.
/// Substituted values are never rescanned, and braces that do not name a
/// known placeholder (the JSON schema below) are copied as-is.
pub fn fill_prompt(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let found = after.find('}').and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (end, *value))
        });
        match found {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// System prompt for the two free-text reviews.
pub const REVIEWER_SYSTEM: &str = "You are an expert resume reviewer and technical recruiter. \
    Give specific, actionable feedback. Never invent experience the candidate did not list.";

/// Profile review. Replace `{target_role}`, `{summary}`, `{skills}` and
/// `{format}` before sending. The "Enhanced Version" and "Missing Keywords"
/// headings are parsed back out when suggestions are applied.
pub const PROFILE_REVIEW_PROMPT: &str = r#"As an expert resume reviewer and hiring manager with extensive experience in {target_role} roles, perform a comprehensive analysis of this professional profile:

TARGET ROLE: {target_role}
CURRENT SUMMARY:
{summary}
SKILLS: {skills}

Provide detailed, actionable feedback under exactly these numbered headings:

1. Profile Strengths:
• List the strong points of the current profile
• Note any standout achievements

2. Areas for Improvement:
• Point out specific gaps in the profile
• Note any unclear or weak points

3. Enhanced Version:
Rewrite the profile summary as 2-4 bullet points, one per line, each starting with "• ".

4. Missing Keywords:
A single comma-separated line of industry keywords for {target_role} that the profile lacks.

5. Content Enhancement:
• Provide specific metrics to add
• Suggest stronger action verbs

{format}"#;

/// Skills review. Replace `{target_role}`, `{programming}`, `{frameworks}`,
/// `{other}` and `{format}` before sending.
pub const SKILLS_REVIEW_PROMPT: &str = r#"As a senior technical recruiter specializing in {target_role} positions, analyze these technical competencies:

ROLE: {target_role}
TECHNICAL SKILLS: {programming}
FRAMEWORKS: {frameworks}
OTHER SKILLS: {other}

Provide a detailed analysis under exactly these numbered headings:

1. Core Technical Skills:
• Evaluate current technical skills
• Rate skill relevance

2. Critical Missing Skills:
A single comma-separated line of must-have skills for the role that are not listed above.

3. Framework & Tool Analysis:
• Assess framework knowledge
• Recommend additional tools

4. Skill Development Plan:
• Prioritize learning objectives
• List quick wins

{format}"#;

/// ATS evaluation. Replace `{target_role}`, `{resume_text}` before sending.
pub const ATS_EVALUATION_PROMPT: &str = r#"As an expert ATS (Applicant Tracking System) analyst, evaluate this resume for the role of {target_role}.

RESUME:
{resume_text}

Return a JSON object with this EXACT schema (no extra fields):
{
  "ats_score": 78,
  "score_breakdown": {
    "keyword_relevance": 22,
    "role_alignment": 15,
    "skills_match": 20,
    "format_quality": 12,
    "education_match": 9
  },
  "found_keywords": ["Rust", "PostgreSQL"],
  "missing_keywords": ["Kubernetes"],
  "suggestions": ["Quantify the impact of the payment service rewrite"]
}

Rules:
- ats_score is 0-100 and equals the sum of the breakdown
- keyword_relevance 0-30, role_alignment 0-20, skills_match 0-25, format_quality 0-15, education_match 0-10
- suggestions are concrete edits, most important first, at most 8
- keywords are short phrases, as they would appear in a job posting"#;
