use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use regex::Regex;

/// Header keywords, longest first so "professional experience" wins over
/// "experience".
pub const SECTION_HEADERS: &[&str] = &[
    "professional experience",
    "technical skills",
    "certifications",
    "work history",
    "experience",
    "education",
    "objective",
    "projects",
    "summary",
    "skills",
];

/// Section key for text that appears before the first header.
pub const PREAMBLE: &str = "unknown";

/// Lines longer than this are treated as body text even if they mention a
/// header keyword.
const MAX_HEADER_LEN: usize = 40;

pub const TECHNICAL_SKILLS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "c++",
    "ruby",
    "php",
    "sql",
    "mysql",
    "postgresql",
    "mongodb",
    "react",
    "angular",
    "vue",
    "node.js",
    "express",
    "django",
    "flask",
    "spring",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "gcp",
    "machine learning",
    "ai",
    "data science",
];

static SKILL_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    TECHNICAL_SKILLS
        .iter()
        .filter_map(|skill| {
            let pattern = format!(
                r"(?:^|[^a-z0-9+#.]){}(?:$|[^a-z0-9+#])",
                regex::escape(skill)
            );
            Regex::new(&pattern).ok().map(|re| (*skill, re))
        })
        .collect()
});

static DEGREE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\b(?:bachelor|master|phd|doctorate|b\.?s\.?|b\.?a\.?|m\.?s\.?|m\.?a\.?|ph\.?d\.?|b\.?tech|m\.?tech)\b",
        r"(?:bachelor's|master's)",
        r"(?:degree in|major in)",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// Splits resume text into sections keyed by canonical header keyword.
///
/// A line is a header when it is short and contains one of the known keywords.
/// Repeated headers append to the same section. Blank lines are dropped.
pub fn split_sections(text: &str) -> BTreeMap<String, String> {
    let mut sections: BTreeMap<String, Vec<&str>> = BTreeMap::new();
    let mut current = PREAMBLE.to_string();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(header) = header_keyword(line) {
            current = header.to_string();
            sections.entry(current.clone()).or_default();
        } else {
            sections.entry(current.clone()).or_default().push(line);
        }
    }

    sections
        .into_iter()
        .filter(|(_, lines)| !lines.is_empty())
        .map(|(k, lines)| (k, lines.join("\n")))
        .collect()
}

fn header_keyword(line: &str) -> Option<&'static str> {
    if line.chars().count() > MAX_HEADER_LEN {
        return None;
    }
    let lower = line.to_lowercase();
    SECTION_HEADERS.iter().copied().find(|h| lower.contains(h))
}

fn is_sentence_end(c: char) -> bool {
    c == '.' || c == '\n'
}

/// Finds the sentence (or line) in the education section that names a degree.
pub fn extract_degree(sections: &BTreeMap<String, String>) -> Option<String> {
    let education = sections.get("education")?.to_lowercase();

    for pattern in DEGREE_PATTERNS.iter() {
        if let Some(m) = pattern.find(&education) {
            let start = education[..m.start()]
                .rfind(is_sentence_end)
                .map_or(0, |i| i + 1);
            let end = education[m.end()..]
                .find(is_sentence_end)
                .map_or(education.len(), |i| m.end() + i);
            let sentence = education[start..end].trim();
            if !sentence.is_empty() {
                return Some(sentence.to_string());
            }
        }
    }
    None
}

/// Vocabulary skills mentioned anywhere in the text, lowercased.
pub fn extract_skills(text: &str) -> BTreeSet<String> {
    let lower = text.to_lowercase();
    SKILL_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(&lower))
        .map(|(skill, _)| skill.to_string())
        .collect()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Sentences are runs of text ended by a line break or by `.`, `!`, `?`
/// followed by whitespace or the end of input.
pub fn sentence_count(text: &str) -> usize {
    let mut count = 0;
    let mut has_content = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        let ends_sentence = c == '\n'
            || (matches!(c, '.' | '!' | '?')
                && chars.peek().map_or(true, |next| next.is_whitespace()));
        if ends_sentence {
            if has_content {
                count += 1;
            }
            has_content = false;
        } else if c.is_alphanumeric() {
            has_content = true;
        }
    }
    if has_content {
        count += 1;
    }
    count
}
