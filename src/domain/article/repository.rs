use crate::domain::article::entity::{Article, NewArticle, Tag};
use crate::domain::article::value_objects::{ArticleId, ArticleSlug};
use crate::domain::errors::DomainResult;
use crate::domain::user::User;
use async_trait::async_trait;

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Loads the article together with its tags and author. Any failure while
    /// loading those associations fails the whole call.
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Article>;
    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Article>;
    async fn tags(&self) -> DomainResult<Vec<Tag>>;
    async fn is_favorited(&self, article: Option<&Article>, user: Option<&User>)
    -> DomainResult<bool>;

    async fn create(&self, new_article: NewArticle) -> DomainResult<Article>;
    async fn delete(&self, article: &Article) -> DomainResult<()>;
    /// Returns the favorites count after the change.
    async fn add_favorite(&self, article: &Article, user: &User) -> DomainResult<i64>;
    async fn delete_favorite(&self, article: &Article, user: &User) -> DomainResult<i64>;
}
