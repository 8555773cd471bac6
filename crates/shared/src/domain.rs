use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

id_newtype!(ArticleId);
id_newtype!(UserId);

impl ArticleId {
    /// An empty id marks an article that has not been persisted yet.
    pub fn is_draft(&self) -> bool {
        self.0.is_empty()
    }
}

/// An article as exchanged with the remote article service.
///
/// A record with an empty `id` is a draft and only ever lives in the form
/// state; everything else came back from the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub id: ArticleId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

impl Article {
    pub fn draft() -> Self {
        Self::default()
    }

    pub fn is_persisted(&self) -> bool {
        !self.id.is_draft()
    }

    /// Everything except the identifier, as sent on update.
    pub fn fields(&self) -> ArticleFields {
        ArticleFields {
            title: self.title.clone(),
            description: self.description.clone(),
            tags: self.tags.clone(),
            user_id: self.user_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleFields {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

/// A showcased project as rendered on a portfolio card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub image_url: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub github_url: String,
    pub live_link: String,
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
