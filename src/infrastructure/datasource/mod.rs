// src/infrastructure/datasource/mod.rs
//! The query capability the stores are written against.
mod error;
mod sqlite;

pub use error::map_sqlx;
pub use sqlite::SqliteDatasource;

use crate::domain::errors::DomainResult;
use crate::infrastructure::mapper::{Row, Value};
use async_trait::async_trait;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Text,
    Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

const fn col(name: &'static str, kind: ColumnKind) -> Column {
    Column { name, kind }
}

const USER_COLUMNS: &[Column] = &[
    col("id", ColumnKind::Integer),
    col("username", ColumnKind::Text),
    col("email", ColumnKind::Text),
    col("password", ColumnKind::Text),
    col("bio", ColumnKind::Text),
    col("image", ColumnKind::Text),
    col("created_at", ColumnKind::Timestamp),
    col("updated_at", ColumnKind::Timestamp),
    col("deleted_at", ColumnKind::Timestamp),
];

const ARTICLE_COLUMNS: &[Column] = &[
    col("id", ColumnKind::Integer),
    col("slug", ColumnKind::Text),
    col("title", ColumnKind::Text),
    col("description", ColumnKind::Text),
    col("body", ColumnKind::Text),
    col("author_id", ColumnKind::Integer),
    col("favorites_count", ColumnKind::Integer),
    col("created_at", ColumnKind::Timestamp),
    col("updated_at", ColumnKind::Timestamp),
    col("deleted_at", ColumnKind::Timestamp),
];

const TAG_COLUMNS: &[Column] = &[
    col("id", ColumnKind::Integer),
    col("name", ColumnKind::Text),
    col("created_at", ColumnKind::Timestamp),
    col("updated_at", ColumnKind::Timestamp),
    col("deleted_at", ColumnKind::Timestamp),
];

const ARTICLE_TAG_COLUMNS: &[Column] = &[
    col("article_id", ColumnKind::Integer),
    col("tag_id", ColumnKind::Integer),
];

const FAVORITE_COLUMNS: &[Column] = &[
    col("article_id", ColumnKind::Integer),
    col("user_id", ColumnKind::Integer),
];

const FOLLOW_COLUMNS: &[Column] = &[
    col("from_user_id", ColumnKind::Integer),
    col("to_user_id", ColumnKind::Integer),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Users,
    Articles,
    Tags,
    ArticleTags,
    FavoriteArticles,
    Follows,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Articles => "articles",
            Table::Tags => "tags",
            Table::ArticleTags => "article_tags",
            Table::FavoriteArticles => "favorite_articles",
            Table::Follows => "follows",
        }
    }

    pub fn columns(&self) -> &'static [Column] {
        match self {
            Table::Users => USER_COLUMNS,
            Table::Articles => ARTICLE_COLUMNS,
            Table::Tags => TAG_COLUMNS,
            Table::ArticleTags => ARTICLE_TAG_COLUMNS,
            Table::FavoriteArticles => FAVORITE_COLUMNS,
            Table::Follows => FOLLOW_COLUMNS,
        }
    }

    /// Entity tables are soft-deleted through `deleted_at`; join tables are not.
    pub fn is_soft_deleted(&self) -> bool {
        matches!(self, Table::Users | Table::Articles | Table::Tags)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Conjunction of `column = value` conditions.
///
/// Soft-deleted rows are excluded unless the filter opts into them with
/// `with_deleted`; unique constraints still cover those rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(&'static str, Value)>,
    with_deleted: bool,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.conditions.push((column, value.into()));
        self
    }

    pub fn with_deleted(mut self) -> Self {
        self.with_deleted = true;
        self
    }

    pub fn includes_deleted(&self) -> bool {
        self.with_deleted
    }

    pub fn conditions(&self) -> &[(&'static str, Value)] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Associations an article row can be hydrated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Association {
    /// Tags reached through `article_tags`, keyed by the owner's `id`.
    Tags,
    /// The `users` row referenced by the owner's `author_id`.
    Author,
}

impl Association {
    pub fn target(&self) -> Table {
        match self {
            Association::Tags => Table::Tags,
            Association::Author => Table::Users,
        }
    }
}

/// Executes parameterized reads and writes against persisted relational data.
///
/// Implementations report a missing row as `DomainError::NotFound` and every
/// other fault as `DomainError::Persistence`. Soft-deleted rows are not
/// returned, counted or updated unless the filter asks for them.
#[async_trait]
pub trait Datasource: Send + Sync {
    async fn find_one(&self, table: Table, filter: &Filter) -> DomainResult<Row>;

    async fn find_many(&self, table: Table, filter: &Filter) -> DomainResult<Vec<Row>>;

    async fn count(&self, table: Table, filter: &Filter) -> DomainResult<i64>;

    async fn load_association(&self, owner: &Row, association: Association)
    -> DomainResult<Vec<Row>>;

    /// Returns the new row id. Join tables ignore an already present pair
    /// and return 0.
    async fn insert(&self, table: Table, row: Row) -> DomainResult<i64>;

    /// Returns the number of rows changed.
    async fn update(&self, table: Table, filter: &Filter, changes: Row) -> DomainResult<u64>;

    /// Physically removes join-table rows. Entity tables refuse physical
    /// removal; soft-delete them through `update` instead.
    async fn delete(&self, table: Table, filter: &Filter) -> DomainResult<u64>;
}
