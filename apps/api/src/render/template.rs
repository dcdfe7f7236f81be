use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The enumerated set of resume layouts. Unknown identifiers are rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    #[default]
    Modern,
    Classic,
}

/// Visual parameters shared by the HTML (PDF) and DOCX renderers.
#[derive(Debug, Clone, Copy)]
pub struct TemplateStyle {
    pub font_family: &'static str,
    pub body_pt: u32,
    pub heading_pt: u32,
    pub name_pt: u32,
    /// Hex colour without `#`.
    pub accent: &'static str,
    pub centered_header: bool,
    pub uppercase_headings: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfo {
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
}

impl TemplateId {
    pub const ALL: [TemplateId; 2] = [TemplateId::Modern, TemplateId::Classic];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Modern => "modern",
            TemplateId::Classic => "classic",
        }
    }

    pub fn style(self) -> TemplateStyle {
        match self {
            TemplateId::Modern => TemplateStyle {
                font_family: "Calibri",
                body_pt: 12,
                heading_pt: 14,
                name_pt: 20,
                accent: "0563C1",
                centered_header: true,
                uppercase_headings: true,
            },
            TemplateId::Classic => TemplateStyle {
                font_family: "Georgia",
                body_pt: 11,
                heading_pt: 13,
                name_pt: 22,
                accent: "000000",
                centered_header: false,
                uppercase_headings: false,
            },
        }
    }

    pub fn info(self) -> TemplateInfo {
        let (name, description) = match self {
            TemplateId::Modern => (
                "Modern",
                "Centered header, uppercase section rules, Calibri; ATS-friendly single column",
            ),
            TemplateId::Classic => (
                "Classic",
                "Left-aligned serif layout with title-case sections; single column",
            ),
        };
        TemplateInfo {
            id: self,
            name,
            description,
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "modern" => Ok(TemplateId::Modern),
            "classic" => Ok(TemplateId::Classic),
            other => Err(format!(
                "Unknown template '{other}'; expected one of: {}",
                TemplateId::ALL
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}
