//! Create, update and delete requests, each followed by a full list refetch.
//!
//! Nothing is applied to the list before the server acknowledges a write, so
//! a failed request leaves nothing to roll back.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use shared::domain::{Article, ArticleId};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    form::FormState,
    list_view::ListView,
    service::{ArticleService, ServiceError},
    ClientEvent, EventSender, Notification,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub fn name(self) -> &'static str {
        match self {
            MutationKind::Create => "create",
            MutationKind::Update => "update",
            MutationKind::Delete => "delete",
        }
    }

    fn success_message(self) -> &'static str {
        match self {
            MutationKind::Create => "Article published successfully!",
            MutationKind::Update => "Article updated successfully!",
            MutationKind::Delete => "Article deleted successfully!",
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            MutationKind::Create => "Failed to publish the article.",
            MutationKind::Update => "Failed to update the article.",
            MutationKind::Delete => "Failed to delete the article.",
        }
    }
}

#[derive(Debug, Error)]
pub enum MutationError {
    #[error("a {} request is already pending", .0.name())]
    Busy(MutationKind),
    #[error("article id is required to {}", .0.name())]
    MissingId(MutationKind),
    #[error("{} failed: {source}", .kind.name())]
    Remote {
        kind: MutationKind,
        source: ServiceError,
    },
}

/// Create and update share the submit slot: one of them at a time.
#[derive(Default)]
struct PendingFlags {
    submit: AtomicBool,
    delete: AtomicBool,
}

impl PendingFlags {
    fn flag(&self, kind: MutationKind) -> &AtomicBool {
        match kind {
            MutationKind::Create | MutationKind::Update => &self.submit,
            MutationKind::Delete => &self.delete,
        }
    }
}

/// Clears the pending flag for its mutation kind when dropped.
struct PendingGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Cloning yields a handle onto the same pending state, so a renderer can
/// keep one to disable controls while a request is in flight.
#[derive(Clone)]
pub struct MutationCoordinator {
    service: Arc<dyn ArticleService>,
    events: EventSender,
    pending: Arc<PendingFlags>,
}

impl MutationCoordinator {
    pub fn new(service: Arc<dyn ArticleService>, events: EventSender) -> Self {
        Self {
            service,
            events,
            pending: Arc::new(PendingFlags::default()),
        }
    }

    pub fn is_pending(&self, kind: MutationKind) -> bool {
        self.pending.flag(kind).load(Ordering::Acquire)
    }

    /// True while a create or an update is in flight.
    pub fn submit_pending(&self) -> bool {
        self.pending.submit.load(Ordering::Acquire)
    }

    pub async fn create(
        &self,
        article: &Article,
        form: &mut FormState,
        list: &mut ListView,
    ) -> Result<Article, MutationError> {
        let kind = MutationKind::Create;
        let _guard = self.begin(kind)?;
        let result = self.service.create_article(article).await;
        self.settle(kind, result, form, list).await
    }

    pub async fn update(
        &self,
        article: &Article,
        form: &mut FormState,
        list: &mut ListView,
    ) -> Result<Article, MutationError> {
        let kind = MutationKind::Update;
        if article.id.is_draft() {
            warn!("update requested for an article without id");
            return Err(MutationError::MissingId(kind));
        }
        let _guard = self.begin(kind)?;
        let result = self.service.update_article(article).await;
        self.settle(kind, result, form, list).await
    }

    pub async fn delete(
        &self,
        article_id: &ArticleId,
        form: &mut FormState,
        list: &mut ListView,
    ) -> Result<(), MutationError> {
        let kind = MutationKind::Delete;
        if article_id.is_draft() {
            warn!("delete requested for an article without id");
            return Err(MutationError::MissingId(kind));
        }
        let _guard = self.begin(kind)?;
        let result = self.service.delete_article(article_id).await;
        self.settle(kind, result, form, list).await
    }

    fn begin(&self, kind: MutationKind) -> Result<PendingGuard<'_>, MutationError> {
        let flag = self.pending.flag(kind);
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| MutationError::Busy(kind))?;
        Ok(PendingGuard { flag })
    }

    /// Success: notify, reset the draft, then refetch once. Failure: notify
    /// and leave every piece of local state as it was.
    async fn settle<T>(
        &self,
        kind: MutationKind,
        result: Result<T, ServiceError>,
        form: &mut FormState,
        list: &mut ListView,
    ) -> Result<T, MutationError> {
        match result {
            Ok(value) => {
                info!(mutation = kind.name(), "mutation acknowledged");
                self.notify(Notification::success(kind.success_message()));
                form.reset();
                list.refresh().await;
                Ok(value)
            }
            Err(source) => {
                warn!(mutation = kind.name(), error = %source, "mutation failed");
                self.notify(Notification::error(kind.failure_message()));
                Err(MutationError::Remote { kind, source })
            }
        }
    }

    fn notify(&self, notification: Notification) {
        let _ = self.events.send(ClientEvent::Notification(notification));
    }
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;
