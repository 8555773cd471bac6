//! Portfolio card for a showcased project.

use std::fmt::Write as _;

use shared::domain::Project;

use crate::list_view::truncate_chars;

pub const CARD_DESCRIPTION_CHARS: usize = 200;
pub const VIEW_CODE_LABEL: &str = "View Code";
pub const LIVE_PREVIEW_LABEL: &str = "Live Preview";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLink {
    pub label: &'static str,
    pub href: String,
}

/// Display data for one project. Unlike article rows, every tag is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCard {
    pub name: String,
    pub image_url: String,
    pub description: String,
    pub tags: Vec<String>,
    pub code: CardLink,
    pub preview: CardLink,
}

impl From<&Project> for ProjectCard {
    fn from(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            image_url: project.image_url.clone(),
            description: card_description(&project.description),
            tags: project.tags.clone(),
            code: CardLink {
                label: VIEW_CODE_LABEL,
                href: project.github_url.clone(),
            },
            preview: CardLink {
                label: LIVE_PREVIEW_LABEL,
                href: project.live_link.clone(),
            },
        }
    }
}

impl ProjectCard {
    pub fn links(&self) -> [&CardLink; 2] {
        [&self.code, &self.preview]
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.name);
        let _ = writeln!(out, "  image: {}", self.image_url);
        let _ = writeln!(out, "  {}", self.description);
        if !self.tags.is_empty() {
            let tags: Vec<String> = self.tags.iter().map(|tag| format!("[{tag}]")).collect();
            let _ = writeln!(out, "  {}", tags.join(" "));
        }
        for link in self.links() {
            let _ = writeln!(out, "  {}: {}", link.label, link.href);
        }
        out
    }
}

pub fn card_description(description: &str) -> String {
    truncate_chars(description, CARD_DESCRIPTION_CHARS)
}

pub fn render_cards(projects: &[Project]) -> String {
    projects
        .iter()
        .map(|project| ProjectCard::from(project).render())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "tests/project_card_tests.rs"]
mod tests;
