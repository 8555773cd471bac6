//! The user's article collection, always replaced wholesale from the server.

use std::{fmt::Write as _, sync::Arc};

use shared::domain::{Article, ArticleId, UserId};
use tracing::{info, warn};

use crate::{
    service::{ArticleService, ServiceError},
    session::SessionProvider,
    ClientEvent, EventSender,
};

const DESCRIPTION_PREVIEW_CHARS: usize = 100;
const TAG_PREVIEW_COUNT: usize = 3;

pub const EMPTY_LIST_MESSAGE: &str = "No articles available.";
pub const LOAD_ERROR_MESSAGE: &str = "Something went wrong while loading articles.";
pub const LOADING_MESSAGE: &str = "Loading articles...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Error(String),
    Empty,
    Ready(Vec<Article>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStateKind {
    Loading,
    Error,
    Empty,
    Ready,
}

impl ListState {
    pub fn kind(&self) -> ListStateKind {
        match self {
            ListState::Loading => ListStateKind::Loading,
            ListState::Error(_) => ListStateKind::Error,
            ListState::Empty => ListStateKind::Empty,
            ListState::Ready(_) => ListStateKind::Ready,
        }
    }

    fn from_fetch(result: Result<Vec<Article>, ServiceError>) -> Self {
        match result {
            Ok(articles) if articles.is_empty() => ListState::Empty,
            Ok(articles) => ListState::Ready(articles),
            Err(err) => ListState::Error(err.to_string()),
        }
    }
}

/// One rendered list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRow {
    pub id: ArticleId,
    pub title: String,
    pub description: String,
    pub tags: String,
}

impl From<&Article> for ArticleRow {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id.clone(),
            title: article.title.clone(),
            description: truncate_description(&article.description),
            tags: preview_tags(&article.tags),
        }
    }
}

pub struct ListView {
    service: Arc<dyn ArticleService>,
    session: Arc<dyn SessionProvider>,
    events: EventSender,
    state: ListState,
}

impl ListView {
    pub fn new(
        service: Arc<dyn ArticleService>,
        session: Arc<dyn SessionProvider>,
        events: EventSender,
    ) -> Self {
        Self {
            service,
            session,
            events,
            state: ListState::Loading,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn articles(&self) -> &[Article] {
        match &self.state {
            ListState::Ready(articles) => articles,
            _ => &[],
        }
    }

    pub fn find(&self, article_id: &ArticleId) -> Option<&Article> {
        self.articles()
            .iter()
            .find(|article| &article.id == article_id)
    }

    /// Resolves the session user and fetches that user's articles.
    pub async fn refresh(&mut self) -> &ListState {
        let user_id = self.session.current_user().await;
        self.fetch(user_id.as_ref()).await
    }

    /// Replaces the whole collection with the server's current view. The
    /// previous state stays visible until the response arrives.
    pub async fn fetch(&mut self, user_id: Option<&UserId>) -> &ListState {
        let result = match user_id {
            Some(user_id) => self.service.list_articles(user_id).await,
            None => Err(ServiceError::NoSession),
        };
        self.state = ListState::from_fetch(result);

        match &self.state {
            ListState::Error(message) => warn!(%message, "article list fetch failed"),
            state => info!(
                kind = ?state.kind(),
                count = self.articles().len(),
                "article list refreshed"
            ),
        }
        let _ = self.events.send(ClientEvent::ListRefreshed {
            kind: self.state.kind(),
            count: self.articles().len(),
        });
        &self.state
    }

    pub fn rows(&self) -> Vec<ArticleRow> {
        self.articles().iter().map(ArticleRow::from).collect()
    }

    pub fn render(&self) -> String {
        match &self.state {
            ListState::Loading => LOADING_MESSAGE.to_string(),
            ListState::Error(_) => LOAD_ERROR_MESSAGE.to_string(),
            ListState::Empty => EMPTY_LIST_MESSAGE.to_string(),
            ListState::Ready(_) => {
                let mut out = String::new();
                for row in self.rows() {
                    let _ = writeln!(out, "[{}] {}", row.id, row.title);
                    let _ = writeln!(out, "    {}", row.description);
                    let _ = writeln!(out, "    {}", row.tags);
                }
                out
            }
        }
    }
}

/// First 100 characters followed by `...` when the text is longer.
pub fn truncate_description(description: &str) -> String {
    truncate_chars(description, DESCRIPTION_PREVIEW_CHARS)
}

/// Keeps the first `limit` characters, appending `...` only when something
/// was cut.
pub(crate) fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

pub fn preview_tags(tags: &[String]) -> String {
    tags.iter()
        .take(TAG_PREVIEW_COUNT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "tests/list_view_tests.rs"]
mod tests;
