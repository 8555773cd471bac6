//! Description editor capability. The editor itself is opaque; the form only
//! ever receives its formatted output.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use thiserror::Error;

use crate::form::FormState;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RichTextError {
    #[error("rich text editor is not available")]
    Unavailable,
    #[error("rich text editor is still loading")]
    NotReady,
}

pub trait RichTextEditor: Send + Sync {
    fn is_ready(&self) -> bool {
        true
    }

    fn format(&self, input: &str) -> String;
}

/// Wraps each non-blank input line in a paragraph element.
pub struct ParagraphEditor;

impl RichTextEditor for ParagraphEditor {
    fn format(&self, input: &str) -> String {
        input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| format!("<p>{}</p>", escape_markup(line)))
            .collect()
    }
}

/// An editor that only becomes usable once its loader calls `mark_ready`.
pub struct DeferredEditor<E> {
    inner: E,
    ready: AtomicBool,
}

impl<E: RichTextEditor> DeferredEditor<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            ready: AtomicBool::new(false),
        }
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }
}

impl<E: RichTextEditor> RichTextEditor for DeferredEditor<E> {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire) && self.inner.is_ready()
    }

    fn format(&self, input: &str) -> String {
        self.inner.format(input)
    }
}

#[derive(Clone, Default)]
pub struct RichTextField {
    editor: Option<Arc<dyn RichTextEditor>>,
}

impl RichTextField {
    pub fn unavailable() -> Self {
        Self { editor: None }
    }

    pub fn with_editor(editor: Arc<dyn RichTextEditor>) -> Self {
        Self {
            editor: Some(editor),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.editor.as_ref().is_some_and(|editor| editor.is_ready())
    }

    /// Formats `input` and stores it as the draft description. The form is
    /// left untouched unless the editor is present and ready.
    pub fn apply(&self, input: &str, form: &mut FormState) -> Result<(), RichTextError> {
        let editor = self.editor.as_ref().ok_or(RichTextError::Unavailable)?;
        if !editor.is_ready() {
            return Err(RichTextError::NotReady);
        }
        form.set_description(editor.format(input));
        Ok(())
    }
}

fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
#[path = "tests/rich_text_tests.rs"]
mod tests;
