use std::io::Cursor;

use docx_rs::{AlignmentType, Docx, Paragraph, Run, RunFonts};

use crate::models::resume::Resume;
use crate::render::template::{TemplateId, TemplateStyle};
use crate::render::RenderError;

/// Builds a Word document with the same section order as the HTML template.
pub fn render_docx(resume: &Resume, template: TemplateId) -> Result<Vec<u8>, RenderError> {
    let style = template.style();
    let writer = DocxWriter { style };
    let p = &resume.personal_info;

    let mut docx = Docx::new();

    let header_align = if style.centered_header {
        AlignmentType::Center
    } else {
        AlignmentType::Left
    };
    docx = docx.add_paragraph(
        Paragraph::new()
            .add_run(writer.run(&p.name).bold().size(style.name_pt as usize * 2))
            .align(header_align),
    );

    let contact = [&p.email, &p.phone, &p.location, &p.linkedin, &p.github]
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(" | ");
    docx = docx.add_paragraph(Paragraph::new().add_run(writer.body(&contact)).align(header_align));

    docx = docx.add_paragraph(writer.heading("Education"));
    for e in &resume.education {
        docx = docx.add_paragraph(Paragraph::new().add_run(writer.body(&e.institution).bold()));
        docx = docx.add_paragraph(Paragraph::new().add_run(writer.body(&e.degree)));
        let mut details = Vec::new();
        if !e.gpa.is_empty() {
            details.push(format!("CGPA: {}", e.gpa));
        }
        if let Some(date) = e.graduation_date {
            details.push(format!("Graduation: {}", date.format("%B %Y")));
        }
        if !details.is_empty() {
            docx = docx.add_paragraph(
                Paragraph::new().add_run(writer.body(&details.join(" | ")).italic()),
            );
        }
    }

    docx = docx.add_paragraph(writer.heading("Profile Summary"));
    if !resume.summary.target_role.is_empty() {
        docx = docx.add_paragraph(
            Paragraph::new()
                .add_run(writer.body("Targeting "))
                .add_run(writer.body(&resume.summary.target_role).bold())
                .add_run(writer.body(" roles.")),
        );
    }
    for bullet in &resume.summary.bullets {
        docx = docx.add_paragraph(writer.bullet(bullet));
    }

    docx = docx.add_paragraph(writer.heading("Experience"));
    for e in &resume.experience {
        let mut line = Paragraph::new().add_run(writer.body(&e.title).bold());
        if !e.company.is_empty() {
            line = line.add_run(writer.body(&format!(", {}", e.company)));
        }
        let dates = [e.start.as_str(), e.end.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" – ");
        if !dates.is_empty() {
            line = line.add_run(writer.body(&format!("  ({dates})")).italic());
        }
        docx = docx.add_paragraph(line);
        for bullet in &e.bullets {
            docx = docx.add_paragraph(writer.bullet(bullet));
        }
    }

    docx = docx.add_paragraph(writer.heading("Projects"));
    for project in &resume.projects {
        let mut line = Paragraph::new().add_run(writer.body(&project.title).bold());
        if !project.duration.is_empty() {
            line = line.add_run(writer.body(&format!("  ({})", project.duration)).italic());
        }
        docx = docx.add_paragraph(line);
        if !project.tools.is_empty() {
            docx = docx.add_paragraph(
                Paragraph::new()
                    .add_run(writer.body("Tools: "))
                    .add_run(writer.body(&project.tools.join(", ")).bold()),
            );
        }
        if !project.description.is_empty() {
            docx = docx.add_paragraph(Paragraph::new().add_run(writer.body(&project.description)));
        }
        for item in &project.responsibilities {
            docx = docx.add_paragraph(writer.bullet(item));
        }
    }

    docx = docx.add_paragraph(writer.heading("Achievements"));
    for item in &resume.achievements {
        docx = docx.add_paragraph(writer.bullet(item));
    }

    docx = docx.add_paragraph(writer.heading("Skills"));
    for (label, items) in resume.skills.groups() {
        if items.is_empty() {
            continue;
        }
        docx = docx.add_paragraph(
            Paragraph::new()
                .add_run(writer.body(&format!("{label}: ")).bold())
                .add_run(writer.body(&items.join(", "))),
        );
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| RenderError::Docx(e.to_string()))?;
    Ok(buf.into_inner())
}

struct DocxWriter {
    style: TemplateStyle,
}

impl DocxWriter {
    fn run(&self, text: &str) -> Run {
        Run::new()
            .add_text(text)
            .fonts(RunFonts::new().ascii(self.style.font_family))
    }

    /// Sizes are in half-points.
    fn body(&self, text: &str) -> Run {
        self.run(text).size(self.style.body_pt as usize * 2)
    }

    fn heading(&self, title: &str) -> Paragraph {
        let title = if self.style.uppercase_headings {
            title.to_uppercase()
        } else {
            title.to_string()
        };
        Paragraph::new().add_run(
            self.run(&title)
                .bold()
                .size(self.style.heading_pt as usize * 2)
                .color(self.style.accent),
        )
    }

    fn bullet(&self, text: &str) -> Paragraph {
        Paragraph::new().add_run(self.body(&format!("• {text}")))
    }
}
