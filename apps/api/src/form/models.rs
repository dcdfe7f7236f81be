//! Raw form payloads as a browser form sends them: lists typed as
//! comma-separated strings, bullets typed one per line.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::FieldError;
use crate::models::resume::{
    EducationEntry, ExperienceEntry, PersonalInfo, ProfileSummary, ProjectEntry, Resume, Skills,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeForm {
    pub personal_info: PersonalInfo,
    pub profile_summary: ProfileSummaryForm,
    pub experience: Vec<ExperienceForm>,
    pub education: Vec<EducationForm>,
    pub skills: SkillsForm,
    pub projects: Vec<ProjectForm>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSummaryForm {
    pub target_role: String,
    /// One bullet per line.
    pub summary: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceForm {
    pub title: String,
    pub company: String,
    pub start: String,
    pub end: String,
    /// One bullet per line.
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationForm {
    pub institution: String,
    pub degree: String,
    /// `2025-05-31`, `2025-05` or `May 2025`.
    pub graduation_date: String,
    pub gpa: String,
}

/// Comma-separated skill lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsForm {
    pub programming: String,
    pub frameworks: String,
    pub tools: String,
    pub soft_skills: String,
    pub other: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectForm {
    pub title: String,
    pub duration: String,
    /// Comma-separated.
    pub tools: String,
    pub description: String,
    /// One responsibility per line.
    pub responsibilities: String,
}

impl ResumeForm {
    /// Converts the raw form into a `Resume`, collecting field-level parse errors.
    /// Required-field checks are done separately by `validate_resume`.
    pub fn normalize(self) -> (Resume, Vec<FieldError>) {
        let mut errors = Vec::new();

        let personal_info = PersonalInfo {
            name: self.personal_info.name.trim().to_string(),
            email: self.personal_info.email.trim().to_string(),
            phone: self.personal_info.phone.trim().to_string(),
            location: self.personal_info.location.trim().to_string(),
            linkedin: self.personal_info.linkedin.trim().to_string(),
            github: self.personal_info.github.trim().to_string(),
        };

        let education = self
            .education
            .into_iter()
            .enumerate()
            .map(|(i, e)| {
                let graduation_date = match parse_graduation_date(&e.graduation_date) {
                    Ok(date) => date,
                    Err(()) => {
                        errors.push(FieldError::new(
                            format!("education[{i}].graduation_date"),
                            format!(
                                "Education {} graduation date '{}' is not a valid date",
                                i + 1,
                                e.graduation_date.trim()
                            ),
                        ));
                        None
                    }
                };
                EducationEntry {
                    institution: e.institution.trim().to_string(),
                    degree: e.degree.trim().to_string(),
                    graduation_date,
                    gpa: e.gpa.trim().to_string(),
                }
            })
            .collect();

        let resume = Resume {
            personal_info,
            summary: ProfileSummary {
                target_role: self.profile_summary.target_role.trim().to_string(),
                bullets: split_lines(&self.profile_summary.summary),
            },
            experience: self
                .experience
                .into_iter()
                .map(|e| ExperienceEntry {
                    title: e.title.trim().to_string(),
                    company: e.company.trim().to_string(),
                    start: e.start.trim().to_string(),
                    end: e.end.trim().to_string(),
                    bullets: split_lines(&e.description),
                })
                .collect(),
            education,
            skills: Skills {
                programming: split_list(&self.skills.programming),
                frameworks: split_list(&self.skills.frameworks),
                tools: split_list(&self.skills.tools),
                soft_skills: split_list(&self.skills.soft_skills),
                other: split_list(&self.skills.other),
            },
            projects: self
                .projects
                .into_iter()
                .map(|p| ProjectEntry {
                    title: p.title.trim().to_string(),
                    duration: p.duration.trim().to_string(),
                    tools: split_list(&p.tools),
                    description: p.description.trim().to_string(),
                    responsibilities: split_lines(&p.responsibilities),
                })
                .collect(),
            achievements: self
                .achievements
                .iter()
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect(),
        };

        (resume, errors)
    }
}

/// Splits a comma-separated list, trimming and dropping empty items.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Splits one-item-per-line text, stripping leading bullet markers.
pub fn split_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|l| l.trim_start_matches(['•', '-', '*', ' ', '\t']).trim())
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

/// Empty input is `Ok(None)`; unparseable input is `Err(())`.
fn parse_graduation_date(raw: &str) -> Result<Option<NaiveDate>, ()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d"))
        .or_else(|_| NaiveDate::parse_from_str(&format!("1 {raw}"), "%d %B %Y"))
        .or_else(|_| NaiveDate::parse_from_str(&format!("1 {raw}"), "%d %b %Y"))
        .map(Some)
        .map_err(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_drops_blanks() {
        assert_eq!(
            split_list(" Rust,  Go , ,Python,"),
            vec!["Rust", "Go", "Python"]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_split_lines_strips_bullet_markers() {
        let lines = split_lines("- Built a parser\n• Shipped v2\n\n  * Led a team of 4\n");
        assert_eq!(lines, vec!["Built a parser", "Shipped v2", "Led a team of 4"]);
    }

    #[test]
    fn test_graduation_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 5, 1);
        assert_eq!(parse_graduation_date("2025-05-01"), Ok(expected));
        assert_eq!(parse_graduation_date("2025-05"), Ok(expected));
        assert_eq!(parse_graduation_date("May 2025"), Ok(expected));
        assert_eq!(parse_graduation_date(""), Ok(None));
        assert_eq!(parse_graduation_date("someday"), Err(()));
    }

    #[test]
    fn test_normalize_reports_bad_date() {
        let form = ResumeForm {
            education: vec![EducationForm {
                institution: "MIT".to_string(),
                degree: "BSc".to_string(),
                graduation_date: "soon".to_string(),
                gpa: String::new(),
            }],
            ..Default::default()
        };
        let (resume, errors) = form.normalize();
        assert_eq!(resume.education[0].graduation_date, None);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "education[0].graduation_date");
    }

    #[test]
    fn test_normalize_maps_lists() {
        let form = ResumeForm {
            skills: SkillsForm {
                programming: "Rust, Python".to_string(),
                ..Default::default()
            },
            projects: vec![ProjectForm {
                title: " Compiler ".to_string(),
                tools: "LLVM, Rust".to_string(),
                responsibilities: "- Wrote the lexer\n- Wrote the parser".to_string(),
                ..Default::default()
            }],
            achievements: vec!["Dean's List".to_string(), "  ".to_string()],
            ..Default::default()
        };
        let (resume, errors) = form.normalize();
        assert!(errors.is_empty());
        assert_eq!(resume.skills.programming, vec!["Rust", "Python"]);
        assert_eq!(resume.projects[0].title, "Compiler");
        assert_eq!(resume.projects[0].tools, vec!["LLVM", "Rust"]);
        assert_eq!(resume.projects[0].responsibilities.len(), 2);
        assert_eq!(resume.achievements, vec!["Dean's List"]);
    }
}
