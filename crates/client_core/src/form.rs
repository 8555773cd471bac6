//! Draft article state and field-level validation.

use std::{collections::BTreeMap, fmt, str::FromStr};

use shared::domain::Article;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Description,
    Tags,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Title, Field::Description, Field::Tags];

    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Tags => "tags",
        }
    }

    fn required_message(self) -> &'static str {
        match self {
            Field::Title => "Title is required",
            Field::Description => "Description is required",
            Field::Tags => "At least one tag is required",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == value)
            .ok_or_else(|| format!("unknown article field '{value}'"))
    }
}

pub type FieldErrors = BTreeMap<Field, String>;

/// Holds the single in-progress draft and its per-field errors.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    draft: Article,
    errors: FieldErrors,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &Article {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_persisted()
    }

    /// Overwrites one field from raw input and clears its error.
    pub fn set_field(&mut self, field: Field, value: &str) {
        match field {
            Field::Title => {
                self.draft.title = value.to_string();
                self.errors.remove(&Field::Title);
            }
            Field::Description => self.set_description(value),
            Field::Tags => self.set_tags(value),
        }
    }

    pub fn set_tags(&mut self, raw: &str) {
        self.draft.tags = split_tags(raw);
        self.errors.remove(&Field::Tags);
    }

    /// Takes the rich text editor's output verbatim.
    pub fn set_description(&mut self, formatted: impl Into<String>) {
        self.draft.description = formatted.into();
        self.errors.remove(&Field::Description);
    }

    pub fn load_for_edit(&mut self, article: &Article) {
        debug!(article_id = %article.id, "loading article into form");
        self.draft = article.clone();
    }

    pub fn reset(&mut self) {
        self.draft = Article::draft();
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.draft.title.trim().is_empty() {
            errors.insert(Field::Title, Field::Title.required_message().to_string());
        }
        if self.draft.description.trim().is_empty() {
            errors.insert(
                Field::Description,
                Field::Description.required_message().to_string(),
            );
        }
        if self.draft.tags.is_empty() {
            errors.insert(Field::Tags, Field::Tags.required_message().to_string());
        }
        errors
    }

    pub(crate) fn record_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    /// The tag field as the user sees it.
    pub fn tags_input(&self) -> String {
        self.draft.tags.join(", ")
    }

    pub fn heading(&self) -> &'static str {
        if self.is_editing() {
            "Edit Article"
        } else {
            "Create New Article"
        }
    }

    pub fn submit_label(&self, pending: bool) -> &'static str {
        match (self.is_editing(), pending) {
            (true, true) => "Updating...",
            (false, true) => "Publishing...",
            (true, false) => "Update Article",
            (false, false) => "Publish Article",
        }
    }
}

/// Comma-separated input to an ordered tag list. Every segment is kept so the
/// field round-trips through [`FormState::tags_input`] while the user types.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).map(str::to_string).collect()
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
