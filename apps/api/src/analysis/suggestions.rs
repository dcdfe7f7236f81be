use std::collections::HashMap;

use crate::analysis::AnalysisResult;
use crate::form::models::{split_lines, split_list};
use crate::models::resume::Resume;

/// Reviewer headings whose content can be merged into a resume.
const HEADINGS: &[(&str, Heading)] = &[
    ("enhanced version", Heading::EnhancedVersion),
    ("missing keywords", Heading::MissingKeywords),
    ("critical missing skills", Heading::CriticalMissingSkills),
    ("key improvements", Heading::Other),
    ("metrics", Heading::Other),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    EnhancedVersion,
    MissingKeywords,
    CriticalMissingSkills,
    Other,
}

/// Splits reviewer text into the numbered sections we know how to apply.
///
/// A heading line looks like `3. Enhanced Version:` (markdown emphasis and
/// `#` prefixes allowed); text after the colon on the same line belongs to
/// the section. Unknown headings end the current section.
pub fn extract_sections(text: &str) -> HashMap<Heading, String> {
    let mut sections: HashMap<Heading, Vec<String>> = HashMap::new();
    let mut current: Option<Heading> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some((heading, rest)) = parse_heading(line) {
            current = Some(heading);
            let entry = sections.entry(heading).or_default();
            if !rest.is_empty() {
                entry.push(rest.to_string());
            }
        } else if looks_like_numbered_heading(line) {
            current = None;
        } else if let Some(heading) = current {
            sections.entry(heading).or_default().push(line.to_string());
        }
    }

    sections
        .into_iter()
        .filter(|(h, lines)| *h != Heading::Other && !lines.is_empty())
        .map(|(h, lines)| (h, lines.join("\n")))
        .collect()
}

fn strip_decoration(line: &str) -> &str {
    line.trim_start_matches(['#', '*', '_', ' '])
        .trim_end_matches(['*', '_', ' '])
}

fn strip_number(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    line[digits..]
        .strip_prefix('.')
        .or_else(|| line[digits..].strip_prefix(')'))
        .map(str::trim_start)
}

fn parse_heading(line: &str) -> Option<(Heading, &str)> {
    let line = strip_decoration(line);
    let line = strip_number(line).map(strip_decoration).unwrap_or(line);
    HEADINGS.iter().find_map(|(name, heading)| {
        let prefix = line.get(..name.len())?;
        if !prefix.eq_ignore_ascii_case(name) {
            return None;
        }
        let rest = line[name.len()..].trim_start_matches(['*', '_']).trim();
        match rest.strip_prefix(':') {
            Some(after) => Some((*heading, strip_decoration(after.trim()))),
            None if rest.is_empty() => Some((*heading, "")),
            None => None,
        }
    })
}

fn looks_like_numbered_heading(line: &str) -> bool {
    strip_number(strip_decoration(line))
        .map(|rest| rest.trim_end_matches(['*', '_']).ends_with(':'))
        .unwrap_or(false)
}

/// Comma- or line-separated items, bullets stripped.
fn items(text: &str) -> Vec<String> {
    split_lines(text)
        .iter()
        .flat_map(|line| split_list(line))
        .map(|item| item.trim_end_matches('.').to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

pub const NO_CHANGES: &str =
    "No changes were necessary - your resume already follows the suggestions!";

/// Merges reviewer suggestions into a copy of the resume.
///
/// * the profile's "Enhanced Version" replaces the summary bullets,
/// * "Missing Keywords" and the ATS keyword gaps go to other skills,
/// * "Critical Missing Skills" go to programming skills.
///
/// Skills already present in any group are not added twice. Returns the
/// updated resume and a human-readable list of the changes made, which holds
/// `NO_CHANGES` alone when nothing applied.
pub fn apply_suggestions(resume: &Resume, analysis: &AnalysisResult) -> (Resume, Vec<String>) {
    let mut updated = resume.clone();
    let mut changes = Vec::new();

    let profile = extract_sections(&analysis.profile_analysis);
    let skills = extract_sections(&analysis.skills_analysis);

    if let Some(enhanced) = profile.get(&Heading::EnhancedVersion) {
        let bullets = split_lines(enhanced);
        if !bullets.is_empty() && bullets != updated.summary.bullets {
            updated.summary.bullets = bullets;
            changes.push("Updated profile summary with AI-enhanced version".to_string());
        }
    }

    let mut keywords = profile
        .get(&Heading::MissingKeywords)
        .map(|s| items(s))
        .unwrap_or_default();
    keywords.extend(analysis.keyword_gaps.iter().cloned());
    let added = add_new_skills(&mut updated, keywords, |r| &mut r.skills.other);
    if added > 0 {
        changes.push(format!("Added {added} suggested keywords to skills"));
    }

    let missing_skills = skills
        .get(&Heading::CriticalMissingSkills)
        .map(|s| items(s))
        .unwrap_or_default();
    let added = add_new_skills(&mut updated, missing_skills, |r| &mut r.skills.programming);
    if added > 0 {
        changes.push(format!("Added {added} suggested technical skills"));
    }

    if changes.is_empty() {
        changes.push(NO_CHANGES.to_string());
    }

    (updated, changes)
}

fn add_new_skills<F>(resume: &mut Resume, candidates: Vec<String>, group: F) -> usize
where
    F: Fn(&mut Resume) -> &mut Vec<String>,
{
    let mut added = 0;
    for skill in candidates {
        let skill = skill.trim();
        if skill.is_empty() || resume.skills.contains(skill) {
            continue;
        }
        group(resume).push(skill.to_string());
        added += 1;
    }
    added
}
