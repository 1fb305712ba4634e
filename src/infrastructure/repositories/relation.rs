// src/infrastructure/repositories/relation.rs
use crate::domain::errors::DomainResult;
use crate::infrastructure::datasource::{Datasource, Filter, Table};

/// Many-to-many join tables whose membership the stores test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinRelation {
    /// `favorite_articles(article_id, user_id)`
    Favorite,
    /// `follows(from_user_id, to_user_id)`
    Follow,
}

impl JoinRelation {
    pub fn table(&self) -> Table {
        match self {
            JoinRelation::Favorite => Table::FavoriteArticles,
            JoinRelation::Follow => Table::Follows,
        }
    }

    pub fn columns(&self) -> (&'static str, &'static str) {
        match self {
            JoinRelation::Favorite => ("article_id", "user_id"),
            JoinRelation::Follow => ("from_user_id", "to_user_id"),
        }
    }

    pub fn filter(&self, left: i64, right: i64) -> Filter {
        let (left_column, right_column) = self.columns();
        Filter::new().eq(left_column, left).eq(right_column, right)
    }
}

/// Membership test for a join pair. A missing party is never related and
/// costs no query; otherwise any positive count means the pair exists.
pub async fn relation_exists(
    datasource: &dyn Datasource,
    relation: JoinRelation,
    left: Option<i64>,
    right: Option<i64>,
) -> DomainResult<bool> {
    let (Some(left), Some(right)) = (left, right) else {
        return Ok(false);
    };

    let count = datasource
        .count(relation.table(), &relation.filter(left, right))
        .await?;
    Ok(count > 0)
}
