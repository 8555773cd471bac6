//! In-memory article service used by the workflow tests.

use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use shared::domain::{Article, ArticleId, UserId};
use tokio::sync::{broadcast, Notify};

use crate::{
    service::{ArticleService, ServiceError},
    ClientEvent, Notification,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    List(UserId),
    Create(Article),
    Update(Article),
    Delete(ArticleId),
}

/// Holds create requests until `release` is notified.
pub(crate) struct CreateGate {
    pub entered: Notify,
    pub release: Notify,
}

#[derive(Default)]
pub(crate) struct FakeArticleService {
    articles: Mutex<Vec<Article>>,
    calls: Mutex<Vec<Call>>,
    next_id: AtomicUsize,
    pub fail_writes: AtomicBool,
    pub fail_list: AtomicBool,
    create_gate: Option<Arc<CreateGate>>,
}

impl FakeArticleService {
    pub fn with_articles(articles: Vec<Article>) -> Self {
        Self {
            articles: Mutex::new(articles),
            ..Self::default()
        }
    }

    pub fn gated() -> (Self, Arc<CreateGate>) {
        let gate = Arc::new(CreateGate {
            entered: Notify::new(),
            release: Notify::new(),
        });
        let service = Self {
            create_gate: Some(Arc::clone(&gate)),
            ..Self::default()
        };
        (service, gate)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn list_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::List(_)))
            .count()
    }

    pub fn write_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call, Call::List(_)))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("calls lock").push(call);
    }

    fn write_failure(&self) -> Result<(), ServiceError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ServiceError::Status {
                status: 500,
                message: "backend unavailable".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ArticleService for FakeArticleService {
    async fn list_articles(&self, user_id: &UserId) -> Result<Vec<Article>, ServiceError> {
        self.record(Call::List(user_id.clone()));
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(ServiceError::Status {
                status: 502,
                message: "bad gateway".into(),
            });
        }
        Ok(self.articles.lock().expect("articles lock").clone())
    }

    async fn create_article(&self, article: &Article) -> Result<Article, ServiceError> {
        self.record(Call::Create(article.clone()));
        if let Some(gate) = &self.create_gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        self.write_failure()?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let created = Article {
            id: ArticleId::new(format!("a-{n}")),
            user_id: Some(UserId::from("u-1")),
            ..article.clone()
        };
        self.articles
            .lock()
            .expect("articles lock")
            .push(created.clone());
        Ok(created)
    }

    async fn update_article(&self, article: &Article) -> Result<Article, ServiceError> {
        self.record(Call::Update(article.clone()));
        self.write_failure()?;
        let mut articles = self.articles.lock().expect("articles lock");
        let slot = articles
            .iter_mut()
            .find(|existing| existing.id == article.id)
            .ok_or(ServiceError::Status {
                status: 404,
                message: "article not found".into(),
            })?;
        *slot = article.clone();
        Ok(article.clone())
    }

    async fn delete_article(&self, article_id: &ArticleId) -> Result<(), ServiceError> {
        self.record(Call::Delete(article_id.clone()));
        self.write_failure()?;
        self.articles
            .lock()
            .expect("articles lock")
            .retain(|article| &article.id != article_id);
        Ok(())
    }
}

pub(crate) fn article(id: &str, title: &str, description: &str, tags: &[&str]) -> Article {
    Article {
        id: ArticleId::from(id),
        title: title.to_string(),
        description: description.to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        user_id: Some(UserId::from("u-1")),
    }
}

pub(crate) fn drain_notifications(rx: &mut broadcast::Receiver<ClientEvent>) -> Vec<Notification> {
    let mut notifications = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let ClientEvent::Notification(notification) = event {
            notifications.push(notification);
        }
    }
    notifications
}
