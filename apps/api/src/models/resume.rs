use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Structured resume content. Every field defaults to empty so that renderers
/// never see a missing value: absent sections simply render with no content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resume {
    pub personal_info: PersonalInfo,
    pub summary: ProfileSummary,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Skills,
    pub projects: Vec<ProjectEntry>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub github: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSummary {
    pub target_role: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    /// Free text, e.g. "Jan 2023".
    pub start: String,
    /// Free text, e.g. "Present".
    pub end: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub graduation_date: Option<NaiveDate>,
    pub gpa: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub programming: Vec<String>,
    pub frameworks: Vec<String>,
    pub tools: Vec<String>,
    pub soft_skills: Vec<String>,
    pub other: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub title: String,
    pub duration: String,
    pub tools: Vec<String>,
    pub description: String,
    pub responsibilities: Vec<String>,
}

impl Skills {
    /// Labelled skill groups in display order.
    pub fn groups(&self) -> [(&'static str, &[String]); 5] {
        [
            ("Programming", self.programming.as_slice()),
            ("Library / Frameworks", self.frameworks.as_slice()),
            ("Tools", self.tools.as_slice()),
            ("Soft Skills", self.soft_skills.as_slice()),
            ("Other Skills", self.other.as_slice()),
        ]
    }

    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.programming
            .iter()
            .chain(&self.frameworks)
            .chain(&self.tools)
            .chain(&self.soft_skills)
            .chain(&self.other)
    }

    /// Case-insensitive membership across every group.
    pub fn contains(&self, skill: &str) -> bool {
        self.all().any(|s| s.eq_ignore_ascii_case(skill))
    }
}

impl Resume {
    /// Flattens the resume into plain text, one logical line per field.
    /// Used for prompts and for local text statistics.
    pub fn plain_text(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        let p = &self.personal_info;
        lines.push(p.name.clone());
        lines.push(
            [&p.email, &p.phone, &p.location, &p.linkedin, &p.github]
                .iter()
                .filter(|s| !s.is_empty())
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(" | "),
        );

        lines.push("Summary".to_string());
        if !self.summary.target_role.is_empty() {
            lines.push(format!("Target role: {}", self.summary.target_role));
        }
        lines.extend(self.summary.bullets.iter().cloned());

        lines.push("Experience".to_string());
        for e in &self.experience {
            lines.push(format!("{} at {} ({} - {})", e.title, e.company, e.start, e.end));
            lines.extend(e.bullets.iter().cloned());
        }

        lines.push("Education".to_string());
        for e in &self.education {
            lines.push(format!("{}, {}", e.degree, e.institution));
        }

        lines.push("Projects".to_string());
        for project in &self.projects {
            lines.push(format!("{} ({})", project.title, project.duration));
            lines.push(project.description.clone());
            lines.extend(project.responsibilities.iter().cloned());
        }

        lines.push("Skills".to_string());
        for (label, items) in self.skills.groups() {
            if !items.is_empty() {
                lines.push(format!("{label}: {}", items.join(", ")));
            }
        }

        if !self.achievements.is_empty() {
            lines.push("Achievements".to_string());
            lines.extend(self.achievements.iter().cloned());
        }

        lines.retain(|l| !l.trim().is_empty());
        lines.join("\n")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub candidate_name: String,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalysisRow {
    pub id: Uuid,
    pub resume_id: Option<Uuid>,
    pub ats_score: Option<f64>,
    pub result: Value,
    pub created_at: DateTime<Utc>,
}
