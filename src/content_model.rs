//! The résumé content record and the languages it comes in.
//!
//! [ResumeContent] mirrors the portfolio data files: every field is plain text that
//! may be of any length and contain anything, so nothing here is trusted by the
//! renderer until it has gone through [crate::sanitize]. Missing fields deserialize
//! to their empty value so partially filled records still render.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The two locales a content record is published in
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Es,
    En,
}

impl Language {
    /// The locale the content is authored in
    pub const SOURCE: Language = Language::Es;
    /// The locale the content is translated to
    pub const TARGET: Language = Language::En;

    /// Two-letter lowercase language code
    pub fn code(&self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
        }
    }

    /// Fixed labels that aren't part of the content record
    pub fn labels(&self) -> &'static Labels {
        match self {
            Language::Es => &ES_LABELS,
            Language::En => &EN_LABELS,
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::SOURCE
    }
}

/// Section titles the renderer supplies itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub profile: &'static str,
    pub links: &'static str,
    pub highlights: &'static str,
}

const ES_LABELS: Labels = Labels {
    profile: "Perfil",
    links: "Enlaces",
    highlights: "Destacados",
};

const EN_LABELS: Labels = Labels {
    profile: "Profile",
    links: "Links",
    highlights: "Highlights",
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeContent {
    /// Locale tag carried by the data file itself, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<Language>,
    pub name: String,
    pub title: String,
    pub subtitle: String,
    pub tagline: String,
    pub description: String,
    pub location: String,
    pub phone: String,
    pub email: String,
    pub whatsapp: Option<String>,
    pub social: Social,
    /// Highlight metrics, rendered in this order
    pub stats: Vec<Stat>,
    pub sections: Sections,
}

impl ResumeContent {
    pub fn from_json(json: &str) -> Result<ResumeContent> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ResumeContent> {
        let json = std::fs::read_to_string(path)?;
        ResumeContent::from_json(&json)
    }
}

/// Profile links; an empty string counts as absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Social {
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub portfolio: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stat {
    pub id: String,
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sections {
    pub experience: ExperienceSection,
    pub skills: SkillsSection,
    pub projects: ProjectsSection,
    pub contact: ContactSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceSection {
    pub title: String,
    pub jobs: Vec<ExperienceJob>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceJob {
    pub id: String,
    pub role: String,
    pub company: String,
    pub period: String,
    pub description: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsSection {
    pub title: String,
    pub categories: Vec<SkillCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillCategory {
    pub id: String,
    /// Only used by the web front end
    pub icon: Option<String>,
    pub title: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectsSection {
    pub title: String,
    pub items: Vec<ProjectItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Absent and empty are different: only a present link is rendered
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSection {
    pub title: String,
    pub subtitle: String,
    pub closing: String,
    pub signature: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_records_fill_in_defaults() {
        let content = ResumeContent::from_json(
            r#"{
                "lang": "en",
                "name": "Ada",
                "sections": { "projects": { "items": [ { "title": "Engine" } ] } }
            }"#,
        )
        .unwrap();

        assert_eq!(content.lang, Some(Language::En));
        assert_eq!(content.name, "Ada");
        assert!(content.stats.is_empty());
        assert_eq!(content.sections.projects.items[0].title, "Engine");
        assert_eq!(content.sections.projects.items[0].link, None);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let content =
            ResumeContent::from_json(r#"{ "name": "Ada", "nav": [], "badge": "x" }"#).unwrap();
        assert_eq!(content.name, "Ada");
    }

    #[test]
    fn demo_content_parses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/resume.json");
        let content = ResumeContent::from_path(path).unwrap();
        assert_eq!(content.lang, Some(Language::SOURCE));
        assert_eq!(content.sections.experience.jobs.len(), 2);
        assert_eq!(content.sections.projects.items[1].link, None);
    }

    #[test]
    fn languages_have_codes_and_labels() {
        assert_eq!(Language::SOURCE.code(), "es");
        assert_eq!(Language::TARGET.code(), "en");
        assert_eq!(Language::Es.labels().profile, "Perfil");
        assert_eq!(Language::En.labels().highlights, "Highlights");
    }
}
