use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, patch, post},
    Json, Router,
};
use shared::{
    domain::{Article, ArticleFields, ArticleId, UserId},
    error::{ApiError, ErrorCode},
    protocol::{
        CreateArticleRequest, DeleteArticleResponse, SessionResponse, SessionUser,
        SESSION_COOKIE,
    },
};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;

use api::{create_article, delete_article, list_articles, update_article};
use app_state::AppState;
use config::load_settings;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    let app = build_router(Arc::new(AppState::default()), settings.max_body_bytes);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "article server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/session", get(session))
        .route("/public/articles/:user_id", get(http_list_articles))
        .route("/article", post(http_create_article))
        .route(
            "/article/:article_id",
            patch(http_update_article).delete(http_delete_article),
        )
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn session(headers: HeaderMap) -> Json<SessionResponse> {
    Json(SessionResponse {
        user: session_user(&headers).map(|id| SessionUser { id }),
    })
}

async fn http_list_articles(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Json<Vec<Article>> {
    Json(list_articles(&state.api, &UserId::new(user_id)).await)
}

async fn http_create_article(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreateArticleRequest>,
) -> ApiResult<Article> {
    let caller = require_session(&headers)?;
    let article = create_article(&state.api, &caller, req.data)
        .await
        .map_err(reject)?;
    info!(article_id = %article.id, user_id = %caller, "article created");
    Ok(Json(article))
}

async fn http_update_article(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(article_id): Path<String>,
    Json(fields): Json<ArticleFields>,
) -> ApiResult<Article> {
    let caller = require_session(&headers)?;
    let article = update_article(&state.api, &caller, &ArticleId::new(article_id), fields)
        .await
        .map_err(reject)?;
    info!(article_id = %article.id, user_id = %caller, "article updated");
    Ok(Json(article))
}

async fn http_delete_article(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(article_id): Path<String>,
) -> ApiResult<DeleteArticleResponse> {
    let caller = require_session(&headers)?;
    let deleted = delete_article(&state.api, &caller, &ArticleId::new(article_id))
        .await
        .map_err(reject)?;
    info!(article_id = %deleted.id, user_id = %caller, "article deleted");
    Ok(Json(deleted))
}

/// The user named by the session cookie, if any.
fn session_user(headers: &HeaderMap) -> Option<UserId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| UserId::from(value))
}

fn require_session(headers: &HeaderMap) -> Result<UserId, (StatusCode, Json<ApiError>)> {
    session_user(headers).ok_or_else(|| {
        reject(ApiError::new(
            ErrorCode::Unauthorized,
            "missing session cookie",
        ))
    })
}

fn reject(error: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = match error.code {
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
    };
    warn!(code = ?error.code, message = %error.message, "request rejected");
    (status, Json(error))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
