// src/infrastructure/repositories/users.rs
use super::relation::{JoinRelation, relation_exists};
use crate::application::ports::ClockPort;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::{Email, NewUser, User, UserId, UserRepository, Username};
use crate::infrastructure::datasource::{Datasource, Filter, Table};
use crate::infrastructure::mapper::{Row, new_user_row, user_from_row, user_update_row};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct UserStore {
    datasource: Arc<dyn Datasource>,
    clock: Arc<ClockPort>,
}

impl UserStore {
    pub fn new(datasource: Arc<dyn Datasource>, clock: Arc<ClockPort>) -> Self {
        Self { datasource, clock }
    }

    async fn find_by(&self, filter: Filter) -> DomainResult<User> {
        let row = self.datasource.find_one(Table::Users, &filter).await?;
        Ok(user_from_row(&row))
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: UserId) -> DomainResult<User> {
        self.find_by(Filter::new().eq("id", i64::from(id))).await
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<User> {
        self.find_by(Filter::new().eq("email", email.as_str())).await
    }

    async fn find_by_username(&self, username: &Username) -> DomainResult<User> {
        self.find_by(Filter::new().eq("username", username.as_str()))
            .await
    }

    async fn is_following(&self, a: Option<&User>, b: Option<&User>) -> DomainResult<bool> {
        relation_exists(
            self.datasource.as_ref(),
            JoinRelation::Follow,
            a.map(|user| i64::from(user.id)),
            b.map(|user| i64::from(user.id)),
        )
        .await
    }

    async fn create(&self, new_user: NewUser) -> DomainResult<User> {
        let now = self.clock.now();
        let id = self
            .datasource
            .insert(Table::Users, new_user_row(&new_user, now))
            .await?;
        debug!(user_id = id, username = %new_user.username, "user created");

        self.find_by_id(UserId::new(id)).await
    }

    async fn update(&self, user: &User) -> DomainResult<User> {
        let changed = self
            .datasource
            .update(
                Table::Users,
                &Filter::new().eq("id", i64::from(user.id)),
                user_update_row(user, self.clock.now()),
            )
            .await?;

        if changed == 0 {
            return Err(DomainError::NotFound(format!("user {} not found", user.id)));
        }

        self.find_by_id(user.id).await
    }

    async fn follow(&self, a: &User, b: &User) -> DomainResult<()> {
        let (from, to) = JoinRelation::Follow.columns();
        let row = Row::new()
            .with(from, i64::from(a.id))
            .with(to, i64::from(b.id));
        self.datasource.insert(Table::Follows, row).await?;
        Ok(())
    }

    async fn unfollow(&self, a: &User, b: &User) -> DomainResult<()> {
        let filter = JoinRelation::Follow.filter(a.id.into(), b.id.into());
        self.datasource.delete(Table::Follows, &filter).await?;
        Ok(())
    }

    async fn following_user_ids(&self, user: &User) -> DomainResult<Vec<UserId>> {
        let (from, to) = JoinRelation::Follow.columns();
        let rows = self
            .datasource
            .find_many(Table::Follows, &Filter::new().eq(from, i64::from(user.id)))
            .await?;

        Ok(rows.iter().map(|row| UserId::new(row.int(to))).collect())
    }
}
