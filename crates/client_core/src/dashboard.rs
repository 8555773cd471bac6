//! Page-level wiring of form, list, coordinator and description editor.

use std::{fmt::Write as _, sync::Arc};

use shared::domain::{Article, ArticleId};
use tokio::sync::broadcast;
use tracing::debug;

use crate::{
    coordinator::{MutationCoordinator, MutationError},
    event_channel,
    form::{FieldErrors, FormState},
    list_view::{ListState, ListView},
    rich_text::{RichTextError, RichTextField},
    service::ArticleService,
    session::SessionProvider,
    ClientEvent, EventSender,
};

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation failed locally; nothing was sent.
    Invalid(FieldErrors),
    /// A create or update is still in flight.
    Busy,
    Created(Article),
    Updated(Article),
    Failed(MutationError),
}

pub struct ArticleDashboard {
    form: FormState,
    list: ListView,
    coordinator: MutationCoordinator,
    rich_text: RichTextField,
    events: EventSender,
}

impl ArticleDashboard {
    pub fn new(
        service: Arc<dyn ArticleService>,
        session: Arc<dyn SessionProvider>,
        rich_text: RichTextField,
    ) -> Self {
        let events = event_channel();
        Self {
            form: FormState::new(),
            list: ListView::new(Arc::clone(&service), session, events.clone()),
            coordinator: MutationCoordinator::new(service, events.clone()),
            rich_text,
            events,
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn list(&self) -> &ListView {
        &self.list
    }

    pub fn coordinator(&self) -> MutationCoordinator {
        self.coordinator.clone()
    }

    pub async fn load(&mut self) -> &ListState {
        self.list.refresh().await
    }

    /// Copies a listed article into the form. Returns false when the id is not
    /// in the current list.
    pub fn edit(&mut self, article_id: &ArticleId) -> bool {
        match self.list.find(article_id) {
            Some(article) => {
                self.form.load_for_edit(article);
                true
            }
            None => {
                debug!(%article_id, "edit requested for article not in list");
                false
            }
        }
    }

    pub fn type_description(&mut self, input: &str) -> Result<(), RichTextError> {
        self.rich_text.apply(input, &mut self.form)
    }

    /// Validates the draft, then routes it to create or update by whether it
    /// already has an id.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.coordinator.submit_pending() {
            return SubmitOutcome::Busy;
        }

        let errors = self.form.validate();
        if !errors.is_empty() {
            self.form.record_errors(errors.clone());
            return SubmitOutcome::Invalid(errors);
        }

        let draft = self.form.draft().clone();
        let result = if draft.is_persisted() {
            self.coordinator
                .update(&draft, &mut self.form, &mut self.list)
                .await
                .map(SubmitOutcome::Updated)
        } else {
            self.coordinator
                .create(&draft, &mut self.form, &mut self.list)
                .await
                .map(SubmitOutcome::Created)
        };

        match result {
            Ok(outcome) => outcome,
            Err(MutationError::Busy(_)) => SubmitOutcome::Busy,
            Err(err) => SubmitOutcome::Failed(err),
        }
    }

    pub async fn delete(&mut self, article_id: &ArticleId) -> Result<(), MutationError> {
        self.coordinator
            .delete(article_id, &mut self.form, &mut self.list)
            .await
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.form.heading());
        for (field, message) in self.form.errors() {
            let _ = writeln!(out, "  {field}: {message}");
        }
        let _ = writeln!(
            out,
            "[{}]",
            self.form.submit_label(self.coordinator.submit_pending())
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "Published Articles");
        out.push_str(&self.list.render());
        out
    }
}

#[cfg(test)]
#[path = "tests/dashboard_tests.rs"]
mod tests;
