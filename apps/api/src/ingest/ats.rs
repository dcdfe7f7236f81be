//! Local ATS compatibility heuristic. Runs without the AI provider so an
//! upload always gets a score.

use std::collections::HashMap;

use serde::Serialize;

use crate::ingest::sections::{extract_skills, sentence_count, split_sections, word_count};

pub const ACTION_VERBS: &[&str] = &["developed", "implemented", "created", "managed", "led", "designed"];

/// Function words left out of the job-match vectors.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "in", "into", "is", "it",
    "of", "on", "or", "our", "that", "the", "this", "to", "we", "will", "with", "you", "your",
];

const FORMAT_MAX: i32 = 20;
const CONTENT_MAX: i32 = 30;
const SKILLS_MAX: i32 = 25;
const KEYWORD_MAX: i32 = 25;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtsHeuristic {
    pub format_score: i32,
    pub content_score: i32,
    pub skills_score: i32,
    pub keyword_score: i32,
    pub total_score: i32,
    /// Cosine similarity against the job description, when one was given.
    pub job_match: Option<f64>,
    pub feedback: Vec<String>,
}

pub fn score_ats(text: &str, job_description: Option<&str>) -> AtsHeuristic {
    let mut feedback = Vec::new();
    let sections = split_sections(text);

    let mut format = FORMAT_MAX;
    if sections.len() < 3 {
        format -= 10;
        feedback.push("Missing key sections in resume".to_string());
    }
    if sentence_count(text) < 10 {
        format -= 5;
        feedback.push("Resume content seems too brief".to_string());
    }

    let mut content = CONTENT_MAX;
    let words = word_count(text);
    if words < 200 {
        content -= 15;
        feedback.push("Resume content is too short".to_string());
    } else if words > 1000 {
        content -= 10;
        feedback.push("Resume might be too lengthy".to_string());
    }
    if action_verb_count(text) < 5 {
        content -= 10;
        feedback.push("Use more action verbs to describe experiences".to_string());
    }

    let mut skills = SKILLS_MAX;
    if extract_skills(text).len() < 5 {
        skills -= 15;
        feedback.push("Add more technical skills".to_string());
    }

    let (keyword, job_match) = match job_description.filter(|jd| !jd.trim().is_empty()) {
        None => (KEYWORD_MAX, None),
        Some(jd) => {
            let similarity = cosine_similarity(text, jd);
            if similarity < 0.5 {
                feedback.push("Resume doesn't match job description well".to_string());
            }
            ((similarity * KEYWORD_MAX as f64).floor() as i32, Some(similarity))
        }
    };

    let format_score = format.max(0);
    let content_score = content.max(0);
    let skills_score = skills.max(0);
    let keyword_score = keyword.max(0);
    let total_score = format_score + content_score + skills_score + keyword_score;

    if total_score < 70 {
        feedback.push("Consider professional resume review".to_string());
    }
    if total_score < 50 {
        feedback.push("Major improvements needed in content and format".to_string());
    }

    AtsHeuristic {
        format_score,
        content_score,
        skills_score,
        keyword_score,
        total_score,
        job_match,
        feedback,
    }
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric() && c != '+' && c != '#')
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

fn action_verb_count(text: &str) -> usize {
    tokens(text)
        .filter(|t| ACTION_VERBS.contains(&t.as_str()))
        .count()
}

fn term_frequencies(text: &str) -> HashMap<String, f64> {
    let mut tf = HashMap::new();
    for token in tokens(text).filter(|t| !STOPWORDS.contains(&t.as_str())) {
        *tf.entry(token).or_insert(0.0) += 1.0;
    }
    tf
}

/// Cosine similarity of term-frequency vectors, in `[0, 1]`. Stopwords do not
/// count towards either vector.
pub fn cosine_similarity(a: &str, b: &str) -> f64 {
    let a = term_frequencies(a);
    let b = term_frequencies(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let dot: f64 = a
        .iter()
        .filter_map(|(term, x)| b.get(term).map(|y| x * y))
        .sum();
    let norm = |v: &HashMap<String, f64>| v.values().map(|x| x * x).sum::<f64>().sqrt();
    (dot / (norm(&a) * norm(&b))).clamp(0.0, 1.0)
}
