// Upload Parser: turns an uploaded PDF/DOCX into text, sections and a local ATS score.

pub mod ats;
pub mod extract;
pub mod handlers;
pub mod sections;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::form::models::split_lines;
use crate::ingest::ats::{score_ats, AtsHeuristic};
use crate::ingest::extract::{extract_text, DocumentKind, ExtractError};
use crate::ingest::sections::{extract_degree, extract_skills, split_sections, word_count, PREAMBLE};
use crate::models::resume::{EducationEntry, ExperienceEntry, ProjectEntry, Resume};

const NOT_SPECIFIED: &str = "Not specified";
const TARGET_ROLE_MAX_CHARS: usize = 100;
const EXPERIENCE_SECTIONS: &[&str] = &["professional experience", "experience", "work history"];

#[derive(Debug, Clone, Serialize)]
pub struct ParsedResume {
    pub file_name: String,
    pub full_text: String,
    pub sections: BTreeMap<String, String>,
    pub degree: Option<String>,
    pub skills: Vec<String>,
    pub word_count: usize,
    pub local_score: AtsHeuristic,
}

/// Extracts and analyses an uploaded document.
pub async fn parse_document(
    file_name: &str,
    content_type: Option<&str>,
    bytes: Vec<u8>,
    job_description: Option<&str>,
) -> Result<ParsedResume, ExtractError> {
    let kind = DocumentKind::detect(Some(file_name), content_type)?;
    let full_text = extract_text(bytes, kind).await?;
    Ok(ParsedResume::from_text(file_name, full_text, job_description))
}

impl ParsedResume {
    pub fn from_text(file_name: &str, full_text: String, job_description: Option<&str>) -> Self {
        let sections = split_sections(&full_text);
        let degree = extract_degree(&sections);
        let skills = extract_skills(&full_text).into_iter().collect();
        let local_score = score_ats(&full_text, job_description);

        Self {
            file_name: file_name.to_string(),
            word_count: word_count(&full_text),
            full_text,
            sections,
            degree,
            skills,
            local_score,
        }
    }

    fn section(&self, key: &str) -> Option<&str> {
        self.sections.get(key).map(String::as_str)
    }

    /// Best-effort mapping of the parsed text onto the structured resume so
    /// an upload can be analysed like a generated resume.
    pub fn to_resume(&self, job_description: Option<&str>) -> Resume {
        let mut resume = Resume::default();

        if let Some(name) = self.section(PREAMBLE).and_then(|s| s.lines().next()) {
            resume.personal_info.name = name.to_string();
        }

        resume.summary.target_role = match job_description.map(str::trim).filter(|jd| !jd.is_empty()) {
            Some(jd) => jd.chars().take(TARGET_ROLE_MAX_CHARS).collect(),
            None => self
                .section("objective")
                .and_then(|s| s.lines().next())
                .unwrap_or(NOT_SPECIFIED)
                .to_string(),
        };
        resume.summary.bullets = self
            .section("summary")
            .or_else(|| self.section("objective"))
            .map(split_lines)
            .unwrap_or_default();

        resume.skills.programming = self.skills.clone();

        let education = self.section("education");
        resume.education.push(EducationEntry {
            institution: education
                .and_then(|s| s.lines().next())
                .unwrap_or(NOT_SPECIFIED)
                .to_string(),
            degree: self
                .degree
                .clone()
                .or_else(|| education.map(str::to_string))
                .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            ..Default::default()
        });

        for key in EXPERIENCE_SECTIONS {
            if let Some(body) = self.section(key) {
                resume.experience.push(ExperienceEntry {
                    title: title_case(key),
                    bullets: split_lines(body),
                    ..Default::default()
                });
            }
        }

        if let Some(body) = self.section("projects") {
            resume.projects.push(ProjectEntry {
                title: "Projects".to_string(),
                responsibilities: split_lines(body),
                ..Default::default()
            });
        }

        if let Some(body) = self.section("certifications") {
            resume.achievements = split_lines(body);
        }

        resume
    }
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
