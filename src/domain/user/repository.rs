use crate::domain::errors::DomainResult;
use crate::domain::user::{
    entity::{NewUser, User},
    value_objects::{Email, UserId, Username},
};
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> DomainResult<User>;

    async fn find_by_email(&self, email: &Email) -> DomainResult<User>;

    /// Returns the first matching row in datasource order when the username
    /// is not unique.
    async fn find_by_username(&self, username: &Username) -> DomainResult<User>;

    /// `Ok(false)` without touching the datasource when either side is absent.
    async fn is_following(&self, a: Option<&User>, b: Option<&User>) -> DomainResult<bool>;

    async fn create(&self, new_user: NewUser) -> DomainResult<User>;

    async fn update(&self, user: &User) -> DomainResult<User>;

    async fn follow(&self, a: &User, b: &User) -> DomainResult<()>;

    async fn unfollow(&self, a: &User, b: &User) -> DomainResult<()>;

    async fn following_user_ids(&self, user: &User) -> DomainResult<Vec<UserId>>;
}
