//! Article rules of the reference backend: ownership, validation and
//! normalization on top of an in-memory store.

use std::sync::Arc;

use shared::{
    domain::{Article, ArticleFields, ArticleId, UserId},
    error::{ApiError, ErrorCode},
    protocol::DeleteArticleResponse,
};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Articles in insertion order.
#[derive(Clone, Default)]
pub struct ArticleStore {
    articles: Arc<RwLock<Vec<Article>>>,
}

#[derive(Clone, Default)]
pub struct ApiContext {
    pub store: ArticleStore,
}

pub async fn list_articles(ctx: &ApiContext, owner: &UserId) -> Vec<Article> {
    ctx.store
        .articles
        .read()
        .await
        .iter()
        .filter(|article| article.user_id.as_ref() == Some(owner))
        .cloned()
        .collect()
}

/// Stores a new article for `caller`. Any id sent by the client is replaced.
pub async fn create_article(
    ctx: &ApiContext,
    caller: &UserId,
    draft: Article,
) -> Result<Article, ApiError> {
    let (title, description, tags) = normalize(&draft.title, &draft.description, &draft.tags)?;
    let article = Article {
        id: ArticleId::new(Uuid::new_v4().to_string()),
        title,
        description,
        tags,
        user_id: Some(caller.clone()),
    };
    ctx.store.articles.write().await.push(article.clone());
    Ok(article)
}

pub async fn update_article(
    ctx: &ApiContext,
    caller: &UserId,
    article_id: &ArticleId,
    fields: ArticleFields,
) -> Result<Article, ApiError> {
    let (title, description, tags) = normalize(&fields.title, &fields.description, &fields.tags)?;
    let mut articles = ctx.store.articles.write().await;
    let article = articles
        .iter_mut()
        .find(|article| &article.id == article_id)
        .ok_or_else(|| not_found(article_id))?;
    ensure_owner(article, caller)?;

    article.title = title;
    article.description = description;
    article.tags = tags;
    Ok(article.clone())
}

pub async fn delete_article(
    ctx: &ApiContext,
    caller: &UserId,
    article_id: &ArticleId,
) -> Result<DeleteArticleResponse, ApiError> {
    let mut articles = ctx.store.articles.write().await;
    let index = articles
        .iter()
        .position(|article| &article.id == article_id)
        .ok_or_else(|| not_found(article_id))?;
    ensure_owner(&articles[index], caller)?;

    let removed = articles.remove(index);
    Ok(DeleteArticleResponse { id: removed.id })
}

fn normalize(
    title: &str,
    description: &str,
    tags: &[String],
) -> Result<(String, String, Vec<String>), ApiError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ApiError::new(ErrorCode::Validation, "title is required"));
    }
    if description.trim().is_empty() {
        return Err(ApiError::new(
            ErrorCode::Validation,
            "description is required",
        ));
    }
    let tags: Vec<String> = tags
        .iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect();
    if tags.is_empty() {
        return Err(ApiError::new(
            ErrorCode::Validation,
            "at least one tag is required",
        ));
    }
    Ok((title.to_string(), description.to_string(), tags))
}

fn ensure_owner(article: &Article, caller: &UserId) -> Result<(), ApiError> {
    if article.user_id.as_ref() != Some(caller) {
        return Err(ApiError::new(
            ErrorCode::Forbidden,
            format!("article {} belongs to another user", article.id),
        ));
    }
    Ok(())
}

fn not_found(article_id: &ArticleId) -> ApiError {
    ApiError::new(
        ErrorCode::NotFound,
        format!("article {article_id} not found"),
    )
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
