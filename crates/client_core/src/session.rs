use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::UserId,
    protocol::{session_route, SessionResponse},
};
use tracing::warn;

use crate::{
    config::ClientSettings,
    service::{credentialed_client, normalize_base_url, ServiceError},
};

/// Resolves who the current user is. `None` means nobody is signed in.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn current_user(&self) -> Option<UserId>;
}

pub struct StaticSession {
    user_id: UserId,
}

impl StaticSession {
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

#[async_trait]
impl SessionProvider for StaticSession {
    async fn current_user(&self) -> Option<UserId> {
        Some(self.user_id.clone())
    }
}

pub struct MissingSession;

#[async_trait]
impl SessionProvider for MissingSession {
    async fn current_user(&self) -> Option<UserId> {
        None
    }
}

/// Asks the auth endpoint which user the session cookie belongs to.
pub struct HttpSession {
    http: Client,
    session_url: String,
}

impl HttpSession {
    pub fn new(auth_url: &str, session: Option<&str>) -> Result<Self, ServiceError> {
        Ok(Self {
            http: credentialed_client(session)?,
            session_url: format!("{}{}", normalize_base_url(auth_url)?, session_route()),
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ServiceError> {
        let auth_url = settings
            .auth_url
            .as_deref()
            .unwrap_or(&settings.backend_url);
        Self::new(auth_url, settings.session.as_deref())
    }

    async fn fetch(&self) -> Result<SessionResponse, ServiceError> {
        Ok(self
            .http
            .get(&self.session_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
}

#[async_trait]
impl SessionProvider for HttpSession {
    async fn current_user(&self) -> Option<UserId> {
        match self.fetch().await {
            Ok(response) => response.user.map(|user| user.id),
            Err(err) => {
                warn!(url = %self.session_url, %err, "session lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
