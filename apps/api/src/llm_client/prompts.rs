// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Formatting rules appended to every free-text review prompt.
pub const REVIEW_FORMAT_INSTRUCTION: &str = "\
    Format your response with clear bullet points and complete sentences. \
    Avoid line breaks within sentences. \
    Use proper punctuation and capitalization.";
