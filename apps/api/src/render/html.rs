//! HTML resume template. The same markup is served as a preview and handed to
//! the PDF converter, so it only uses CSS that wkhtmltopdf understands.

use askama::Template;

use crate::models::resume::{ExperienceEntry, Resume};
use crate::render::template::{TemplateId, TemplateStyle};
use crate::render::RenderError;

/// Layout for both templates; the differences live in `TemplateStyle`.
#[derive(Template)]
#[template(path = "resume.html")]
struct ResumeTemplate<'a> {
    resume: &'a Resume,
    template: TemplateId,
    style: TemplateStyle,
}

/// One item of the header's contact line.
struct Contact<'a> {
    label: &'static str,
    value: &'a str,
    mailto: bool,
}

impl<'a> ResumeTemplate<'a> {
    fn heading(&self, title: &str) -> String {
        if self.style.uppercase_headings {
            title.to_uppercase()
        } else {
            title.to_string()
        }
    }

    fn align(&self) -> &'static str {
        if self.style.centered_header {
            "center"
        } else {
            "left"
        }
    }

    fn small_pt(&self) -> u32 {
        self.style.body_pt.saturating_sub(1)
    }

    fn dates(&self, entry: &ExperienceEntry) -> String {
        [entry.start.as_str(), entry.end.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" – ")
    }

    fn contact(&self) -> Vec<Contact<'a>> {
        let p = &self.resume.personal_info;
        [
            ("", p.email.as_str(), true),
            ("", p.phone.as_str(), false),
            ("", p.location.as_str(), false),
            ("LinkedIn: ", p.linkedin.as_str(), false),
            ("GitHub: ", p.github.as_str(), false),
        ]
        .into_iter()
        .filter(|(_, value, _)| !value.is_empty())
        .map(|(label, value, mailto)| Contact {
            label,
            value,
            mailto,
        })
        .collect()
    }
}

/// Renders a resume as a standalone HTML document.
/// Every section heading is always emitted; empty sections have no body.
pub fn render_html(resume: &Resume, template: TemplateId) -> Result<String, RenderError> {
    let page = ResumeTemplate {
        resume,
        template,
        style: template.style(),
    };
    Ok(page.render()?)
}
