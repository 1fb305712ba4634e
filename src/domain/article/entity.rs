// src/domain/article/entity.rs
use crate::domain::article::value_objects::{ArticleId, ArticleSlug, TagId};
use crate::domain::user::{User, UserId, Username};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

/// Public projection of the user who owns an article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Author {
    pub id: UserId,
    pub username: Username,
    pub bio: String,
    pub image: String,
}

impl Author {
    /// Zero-valued author carrying only the identity the article points at.
    pub fn unresolved(id: UserId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub id: ArticleId,
    pub slug: ArticleSlug,
    pub title: String,
    pub description: String,
    pub body: String,
    pub author_id: UserId,
    pub author: Author,
    pub tags: Vec<Tag>,
    pub favorites_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Article {
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(|tag| tag.name.as_str()).collect()
    }

    pub fn is_authored_by(&self, user: &User) -> bool {
        self.author_id == user.id
    }
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: String,
    pub description: String,
    pub body: String,
    /// Derived from the title when absent.
    pub slug: Option<ArticleSlug>,
    pub author_id: UserId,
    pub tag_names: Vec<String>,
}

impl NewArticle {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        body: impl Into<String>,
        author_id: UserId,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            body: body.into(),
            slug: None,
            author_id,
            tag_names: Vec::new(),
        }
    }

    pub fn with_slug(mut self, slug: ArticleSlug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag_names = tags.into_iter().map(Into::into).collect();
        self
    }
}
