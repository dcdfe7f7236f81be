// Form/Input Collector: turns a submitted resume form into a validated `Resume`.

pub mod handlers;
pub mod models;
pub mod submission;
pub mod validation;

use crate::errors::AppError;
use crate::form::models::ResumeForm;
use crate::form::validation::validate_resume;
use crate::models::resume::Resume;

/// Normalizes and validates a form in one step.
/// Field parse errors and missing required fields are reported together.
pub fn collect(form: ResumeForm) -> Result<Resume, AppError> {
    let (resume, mut errors) = form.normalize();
    errors.extend(validate_resume(&resume));
    if errors.is_empty() {
        Ok(resume)
    } else {
        Err(AppError::Validation(errors))
    }
}
