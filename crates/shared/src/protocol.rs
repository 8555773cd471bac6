use serde::{Deserialize, Serialize};

use crate::domain::{Article, ArticleId, UserId};

/// Cookie carrying the session credential on every request.
pub const SESSION_COOKIE: &str = "session_user";

/// Body of the creation request. The server ignores any `id` inside `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateArticleRequest {
    pub data: Article,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteArticleResponse {
    pub id: ArticleId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionResponse {
    #[serde(default)]
    pub user: Option<SessionUser>,
}

pub fn session_route() -> &'static str {
    "/session"
}

pub fn article_route() -> &'static str {
    "/article"
}

pub fn article_by_id_route(article_id: &ArticleId) -> String {
    format!("/article/{article_id}")
}

pub fn articles_for_user_route(user_id: &UserId) -> String {
    format!("/public/articles/{user_id}")
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
