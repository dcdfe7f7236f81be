use crate::errors::FieldError;
use crate::models::resume::Resume;

/// Checks that every required field is present.
///
/// Required: name, email, phone, location, at least one education entry with
/// institution and degree, target role, summary, programming skills; every
/// experience entry needs title and company; every project needs title,
/// duration, tools, description and responsibilities. Content quality is not
/// judged here.
pub fn validate_resume(resume: &Resume) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let mut require = |present: bool, field: String, message: String| {
        if !present {
            errors.push(FieldError::new(field, message));
        }
    };

    let p = &resume.personal_info;
    require(
        !p.name.is_empty(),
        "personal_info.name".into(),
        "Full name is required".into(),
    );
    require(
        !p.email.is_empty(),
        "personal_info.email".into(),
        "Email is required".into(),
    );
    require(
        !p.phone.is_empty(),
        "personal_info.phone".into(),
        "Phone number is required".into(),
    );
    require(
        !p.location.is_empty(),
        "personal_info.location".into(),
        "Current location is required".into(),
    );

    if resume.education.is_empty() {
        require(
            false,
            "education".into(),
            "At least one education entry is required".into(),
        );
    }
    for (i, e) in resume.education.iter().enumerate() {
        require(
            !e.institution.is_empty(),
            format!("education[{i}].institution"),
            "University name is required".into(),
        );
        require(
            !e.degree.is_empty(),
            format!("education[{i}].degree"),
            "Degree is required".into(),
        );
    }

    require(
        !resume.summary.target_role.is_empty(),
        "profile_summary.target_role".into(),
        "Target role is required".into(),
    );
    require(
        !resume.summary.bullets.is_empty(),
        "profile_summary.summary".into(),
        "Profile summary is required".into(),
    );
    require(
        !resume.skills.programming.is_empty(),
        "skills.programming".into(),
        "Programming skills are required".into(),
    );

    for (i, e) in resume.experience.iter().enumerate() {
        let n = i + 1;
        require(
            !e.title.is_empty(),
            format!("experience[{i}].title"),
            format!("Experience {n} title is required"),
        );
        require(
            !e.company.is_empty(),
            format!("experience[{i}].company"),
            format!("Experience {n} company is required"),
        );
    }

    for (i, project) in resume.projects.iter().enumerate() {
        let n = i + 1;
        require(
            !project.title.is_empty(),
            format!("projects[{i}].title"),
            format!("Project {n} title is required"),
        );
        require(
            !project.duration.is_empty(),
            format!("projects[{i}].duration"),
            format!("Project {n} duration is required"),
        );
        require(
            !project.tools.is_empty(),
            format!("projects[{i}].tools"),
            format!("Project {n} tools are required"),
        );
        require(
            !project.description.is_empty(),
            format!("projects[{i}].description"),
            format!("Project {n} description is required"),
        );
        require(
            !project.responsibilities.is_empty(),
            format!("projects[{i}].responsibilities"),
            format!("Project {n} responsibilities are required"),
        );
    }

    errors
}
