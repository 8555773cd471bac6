//! HTTP access to the remote article service.

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, COOKIE},
    Client, Response,
};
use shared::{
    domain::{Article, ArticleId, UserId},
    error::ApiError,
    protocol::{
        article_by_id_route, article_route, articles_for_user_route, CreateArticleRequest,
        SESSION_COOKIE,
    },
};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::ClientSettings;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("invalid backend url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("session credential is not a valid header value")]
    InvalidCredential,
    #[error("article id is required for this operation")]
    MissingId,
    #[error("no active session")]
    NoSession,
}

/// The authoritative article store as seen from the client.
#[async_trait]
pub trait ArticleService: Send + Sync {
    async fn list_articles(&self, user_id: &UserId) -> Result<Vec<Article>, ServiceError>;
    async fn create_article(&self, article: &Article) -> Result<Article, ServiceError>;
    /// Sends every field except `id` to the record addressed by `article.id`.
    async fn update_article(&self, article: &Article) -> Result<Article, ServiceError>;
    async fn delete_article(&self, article_id: &ArticleId) -> Result<(), ServiceError>;
}

pub struct HttpArticleService {
    http: Client,
    base_url: String,
}

impl HttpArticleService {
    pub fn new(base_url: &str, session: Option<&str>) -> Result<Self, ServiceError> {
        Ok(Self {
            http: credentialed_client(session)?,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ServiceError> {
        Self::new(&settings.backend_url, settings.session.as_deref())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ArticleService for HttpArticleService {
    async fn list_articles(&self, user_id: &UserId) -> Result<Vec<Article>, ServiceError> {
        let url = format!("{}{}", self.base_url, articles_for_user_route(user_id));
        debug!(%url, "fetching articles");
        let response = self.http.get(url).send().await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn create_article(&self, article: &Article) -> Result<Article, ServiceError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, article_route()))
            .json(&CreateArticleRequest {
                data: article.clone(),
            })
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn update_article(&self, article: &Article) -> Result<Article, ServiceError> {
        if article.id.is_draft() {
            return Err(ServiceError::MissingId);
        }
        let response = self
            .http
            .patch(format!(
                "{}{}",
                self.base_url,
                article_by_id_route(&article.id)
            ))
            .json(&article.fields())
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn delete_article(&self, article_id: &ArticleId) -> Result<(), ServiceError> {
        if article_id.is_draft() {
            return Err(ServiceError::MissingId);
        }
        let response = self
            .http
            .delete(format!("{}{}", self.base_url, article_by_id_route(article_id)))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Builds an HTTP client that attaches the session cookie to every request.
pub(crate) fn credentialed_client(session: Option<&str>) -> Result<Client, ServiceError> {
    let mut headers = HeaderMap::new();
    if let Some(token) = session.filter(|token| !token.is_empty()) {
        let cookie = HeaderValue::from_str(&format!("{SESSION_COOKIE}={token}"))
            .map_err(|_| ServiceError::InvalidCredential)?;
        headers.insert(COOKIE, cookie);
    }
    Ok(Client::builder().default_headers(headers).build()?)
}

pub(crate) fn normalize_base_url(raw: &str) -> Result<String, ServiceError> {
    let parsed = Url::parse(raw.trim())?;
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

async fn check_status(response: Response) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.json::<ApiError>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };
    Err(ServiceError::Status {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
