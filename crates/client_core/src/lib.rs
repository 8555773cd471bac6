use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

pub mod config;
pub mod coordinator;
pub mod dashboard;
pub mod form;
pub mod list_view;
pub mod project_card;
pub mod rich_text;
pub mod service;
pub mod session;

pub use config::{load_settings, ClientSettings};
pub use coordinator::{MutationCoordinator, MutationError, MutationKind};
pub use dashboard::{ArticleDashboard, SubmitOutcome};
pub use form::{Field, FieldErrors, FormState};
pub use list_view::{ArticleRow, ListState, ListStateKind, ListView};
pub use project_card::{CardLink, ProjectCard};
pub use rich_text::{DeferredEditor, ParagraphEditor, RichTextEditor, RichTextError, RichTextField};
pub use service::{ArticleService, HttpArticleService, ServiceError};
pub use session::{HttpSession, MissingSession, SessionProvider, StaticSession};

const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A transient user-facing message (a "toast").
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            at: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ClientEvent {
    Notification(Notification),
    ListRefreshed { kind: ListStateKind, count: usize },
}

pub type EventSender = broadcast::Sender<ClientEvent>;

pub fn event_channel() -> EventSender {
    let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
    events
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
