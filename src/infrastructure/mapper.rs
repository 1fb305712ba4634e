// src/infrastructure/mapper.rs
//! Conversion between raw datasource rows and domain records.
//!
//! Mapping never fails: a missing or NULL column yields the zero value of the
//! field (`0`, `""`, the Unix epoch, `None`).
use crate::domain::article::{Article, ArticleId, ArticleSlug, Author, NewArticle, Tag, TagId};
use crate::domain::user::{Email, NewUser, User, UserId, Username};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Timestamp(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Column/value pairs in the order the datasource produced them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        let column = column.into();
        let value = value.into();
        match self.columns.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => *slot = value,
            None => self.columns.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn int(&self, column: &str) -> i64 {
        match self.get(column) {
            Some(Value::Integer(value)) => *value,
            _ => 0,
        }
    }

    pub fn text(&self, column: &str) -> String {
        match self.get(column) {
            Some(Value::Text(value)) => value.clone(),
            _ => String::new(),
        }
    }

    pub fn timestamp(&self, column: &str) -> DateTime<Utc> {
        self.opt_timestamp(column).unwrap_or_default()
    }

    pub fn opt_timestamp(&self, column: &str) -> Option<DateTime<Utc>> {
        match self.get(column) {
            Some(Value::Timestamp(value)) => Some(*value),
            _ => None,
        }
    }
}

pub fn user_from_row(row: &Row) -> User {
    User {
        id: UserId::new(row.int("id")),
        username: Username::new(row.text("username")),
        email: Email::new(row.text("email")),
        password_hash: row.text("password"),
        bio: row.text("bio"),
        image: row.text("image"),
        created_at: row.timestamp("created_at"),
        updated_at: row.timestamp("updated_at"),
        deleted_at: row.opt_timestamp("deleted_at"),
    }
}

pub fn author_from_row(row: &Row) -> Author {
    Author {
        id: UserId::new(row.int("id")),
        username: Username::new(row.text("username")),
        bio: row.text("bio"),
        image: row.text("image"),
    }
}

pub fn tag_from_row(row: &Row) -> Tag {
    Tag {
        id: TagId(row.int("id")),
        name: row.text("name"),
    }
}

/// Base columns only; the article store attaches tags and the author.
pub fn article_from_row(row: &Row) -> Article {
    let author_id = UserId::new(row.int("author_id"));
    Article {
        id: ArticleId::new(row.int("id")),
        slug: ArticleSlug::new(row.text("slug")),
        title: row.text("title"),
        description: row.text("description"),
        body: row.text("body"),
        author_id,
        author: Author::unresolved(author_id),
        tags: Vec::new(),
        favorites_count: row.int("favorites_count"),
        created_at: row.timestamp("created_at"),
        updated_at: row.timestamp("updated_at"),
        deleted_at: row.opt_timestamp("deleted_at"),
    }
}

pub fn new_user_row(new_user: &NewUser, now: DateTime<Utc>) -> Row {
    Row::new()
        .with("username", new_user.username.as_str())
        .with("email", new_user.email.as_str())
        .with("password", new_user.password_hash.as_str())
        .with("bio", new_user.bio.as_str())
        .with("image", new_user.image.as_str())
        .with("created_at", now)
        .with("updated_at", now)
}

pub fn user_update_row(user: &User, now: DateTime<Utc>) -> Row {
    Row::new()
        .with("username", user.username.as_str())
        .with("email", user.email.as_str())
        .with("password", user.password_hash.as_str())
        .with("bio", user.bio.as_str())
        .with("image", user.image.as_str())
        .with("updated_at", now)
}

pub fn new_article_row(new_article: &NewArticle, slug: &ArticleSlug, now: DateTime<Utc>) -> Row {
    Row::new()
        .with("slug", slug.as_str())
        .with("title", new_article.title.as_str())
        .with("description", new_article.description.as_str())
        .with("body", new_article.body.as_str())
        .with("author_id", i64::from(new_article.author_id))
        .with("favorites_count", 0_i64)
        .with("created_at", now)
        .with("updated_at", now)
}

pub fn tag_row(name: &str, now: DateTime<Utc>) -> Row {
    Row::new()
        .with("name", name)
        .with("created_at", now)
        .with("updated_at", now)
}
