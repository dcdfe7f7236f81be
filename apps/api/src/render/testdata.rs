use chrono::NaiveDate;

use crate::models::resume::{
    EducationEntry, ExperienceEntry, PersonalInfo, ProfileSummary, ProjectEntry, Resume, Skills,
};

/// A resume with every section populated.
pub fn complete_resume() -> Resume {
    Resume {
        personal_info: PersonalInfo {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "+44 20 7946 0000".into(),
            location: "London, UK".into(),
            linkedin: "linkedin.com/in/ada".into(),
            github: "github.com/ada".into(),
        },
        summary: ProfileSummary {
            target_role: "Software Engineer".into(),
            bullets: vec![
                "Backend engineer focused on numerical software".into(),
                "Designed the first published algorithm".into(),
            ],
        },
        experience: vec![ExperienceEntry {
            title: "Analyst".into(),
            company: "Analytical Engine Co".into(),
            start: "Jan 2023".into(),
            end: "Present".into(),
            bullets: vec!["Developed Bernoulli number routines".into()],
        }],
        education: vec![EducationEntry {
            institution: "University of London".into(),
            degree: "BSc Mathematics".into(),
            graduation_date: NaiveDate::from_ymd_opt(2025, 5, 1),
            gpa: "3.9".into(),
        }],
        skills: Skills {
            programming: vec!["Rust".into(), "Python".into()],
            frameworks: vec!["Axum".into()],
            tools: vec!["Docker".into()],
            soft_skills: vec!["Communication".into()],
            other: vec![],
        },
        projects: vec![ProjectEntry {
            title: "Note G".into(),
            duration: "3 months".into(),
            tools: vec!["Rust".into(), "PostgreSQL".into()],
            description: "Computes Bernoulli numbers".into(),
            responsibilities: vec!["Implemented the loop".into()],
        }],
        achievements: vec!["First programmer".into()],
    }
}
