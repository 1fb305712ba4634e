// src/infrastructure/repositories/articles.rs
use super::relation::{JoinRelation, relation_exists};
use crate::application::ports::{ClockPort, SlugGeneratorPort};
use crate::domain::article::{Article, ArticleId, ArticleRepository, ArticleSlug, NewArticle, Tag};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::User;
use crate::infrastructure::datasource::{Association, Datasource, Filter, Table};
use crate::infrastructure::mapper::{
    Row, Value, article_from_row, author_from_row, new_article_row, tag_from_row, tag_row,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct ArticleStore {
    datasource: Arc<dyn Datasource>,
    clock: Arc<ClockPort>,
    slugger: Arc<SlugGeneratorPort>,
}

impl ArticleStore {
    pub fn new(
        datasource: Arc<dyn Datasource>,
        clock: Arc<ClockPort>,
        slugger: Arc<SlugGeneratorPort>,
    ) -> Self {
        Self {
            datasource,
            clock,
            slugger,
        }
    }

    async fn find_by(&self, filter: Filter) -> DomainResult<Article> {
        let row = self.datasource.find_one(Table::Articles, &filter).await?;
        self.hydrate(&row).await
    }

    /// Attaches tags, then the author. Nothing is returned unless both loads
    /// succeed and the author row is still live.
    async fn hydrate(&self, row: &Row) -> DomainResult<Article> {
        let mut article = article_from_row(row);

        let tags = self
            .datasource
            .load_association(row, Association::Tags)
            .await?;
        article.tags = tags.iter().map(tag_from_row).collect();

        let authors = self
            .datasource
            .load_association(row, Association::Author)
            .await?;
        let author = authors.first().ok_or_else(|| {
            DomainError::NotFound(format!(
                "author {} of article {} not found",
                article.author_id, article.id
            ))
        })?;
        article.author = author_from_row(author);

        Ok(article)
    }

    async fn unique_slug(&self, title: &str, now: DateTime<Utc>) -> DomainResult<ArticleSlug> {
        let base = self.slugger.slugify(title);
        let base = if base.is_empty() {
            format!("article-{}", now.timestamp())
        } else {
            base
        };

        // Deleted articles keep their slug in the unique index.
        let mut candidate = base.clone();
        let mut counter = 1u64;
        loop {
            let taken = self
                .datasource
                .count(
                    Table::Articles,
                    &Filter::new().eq("slug", candidate.as_str()).with_deleted(),
                )
                .await?;
            if taken == 0 {
                return Ok(ArticleSlug::new(candidate));
            }
            candidate = format!("{base}-{counter}");
            counter += 1;
        }
    }

    /// Reuses the tag row with this name, reviving it if it was soft-deleted.
    async fn resolve_tag(&self, name: &str, now: DateTime<Utc>) -> DomainResult<i64> {
        match self
            .datasource
            .find_one(Table::Tags, &Filter::new().eq("name", name).with_deleted())
            .await
        {
            Ok(row) => {
                let id = row.int("id");
                if row.opt_timestamp("deleted_at").is_some() {
                    self.datasource
                        .update(
                            Table::Tags,
                            &Filter::new().eq("id", id).with_deleted(),
                            Row::new()
                                .with("deleted_at", Value::Null)
                                .with("updated_at", now),
                        )
                        .await?;
                    debug!(tag_id = id, name, "tag restored");
                }
                Ok(id)
            }
            Err(err) if err.is_not_found() => {
                self.datasource.insert(Table::Tags, tag_row(name, now)).await
            }
            Err(err) => Err(err),
        }
    }

    async fn refresh_favorites_count(&self, article: &Article) -> DomainResult<i64> {
        let (article_column, _) = JoinRelation::Favorite.columns();
        let count = self
            .datasource
            .count(
                Table::FavoriteArticles,
                &Filter::new().eq(article_column, i64::from(article.id)),
            )
            .await?;

        self.datasource
            .update(
                Table::Articles,
                &Filter::new().eq("id", i64::from(article.id)),
                Row::new().with("favorites_count", count),
            )
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl ArticleRepository for ArticleStore {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Article> {
        self.find_by(Filter::new().eq("id", i64::from(id))).await
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Article> {
        self.find_by(Filter::new().eq("slug", slug.as_str())).await
    }

    async fn tags(&self) -> DomainResult<Vec<Tag>> {
        let rows = self
            .datasource
            .find_many(Table::Tags, &Filter::new())
            .await?;
        Ok(rows.iter().map(tag_from_row).collect())
    }

    async fn is_favorited(
        &self,
        article: Option<&Article>,
        user: Option<&User>,
    ) -> DomainResult<bool> {
        relation_exists(
            self.datasource.as_ref(),
            JoinRelation::Favorite,
            article.map(|article| i64::from(article.id)),
            user.map(|user| i64::from(user.id)),
        )
        .await
    }

    async fn create(&self, new_article: NewArticle) -> DomainResult<Article> {
        let now = self.clock.now();
        let slug = match new_article.slug.clone().filter(|slug| !slug.is_empty()) {
            Some(slug) => slug,
            None => self.unique_slug(&new_article.title, now).await?,
        };

        let mut names: Vec<&str> = Vec::new();
        for name in new_article.tag_names.iter().map(|name| name.trim()) {
            if !name.is_empty() && !names.contains(&name) {
                names.push(name);
            }
        }

        let mut tag_ids = Vec::with_capacity(names.len());
        for name in names {
            tag_ids.push(self.resolve_tag(name, now).await?);
        }

        let id = self
            .datasource
            .insert(Table::Articles, new_article_row(&new_article, &slug, now))
            .await?;
        for tag_id in tag_ids {
            let link = Row::new().with("article_id", id).with("tag_id", tag_id);
            self.datasource.insert(Table::ArticleTags, link).await?;
        }
        debug!(article_id = id, slug = %slug, "article created");

        self.find_by_id(ArticleId::new(id)).await
    }

    async fn delete(&self, article: &Article) -> DomainResult<()> {
        let now = self.clock.now();
        let changed = self
            .datasource
            .update(
                Table::Articles,
                &Filter::new().eq("id", i64::from(article.id)),
                Row::new().with("deleted_at", now).with("updated_at", now),
            )
            .await?;

        if changed == 0 {
            return Err(DomainError::NotFound(format!(
                "article {} not found",
                article.id
            )));
        }
        Ok(())
    }

    async fn add_favorite(&self, article: &Article, user: &User) -> DomainResult<i64> {
        let (article_column, user_column) = JoinRelation::Favorite.columns();
        let row = Row::new()
            .with(article_column, i64::from(article.id))
            .with(user_column, i64::from(user.id));
        self.datasource.insert(Table::FavoriteArticles, row).await?;

        self.refresh_favorites_count(article).await
    }

    async fn delete_favorite(&self, article: &Article, user: &User) -> DomainResult<i64> {
        let filter = JoinRelation::Favorite.filter(article.id.into(), user.id.into());
        self.datasource
            .delete(Table::FavoriteArticles, &filter)
            .await?;

        self.refresh_favorites_count(article).await
    }
}
