// tests/support/helpers.rs
use super::mocks::{FixedClock, MockDatasource};
use realworld_store::application::ports::{ClockPort, SlugGeneratorPort};
use realworld_store::infrastructure::datasource::{Datasource, SqliteDatasource};
use realworld_store::infrastructure::repositories::{ArticleStore, UserStore};
use realworld_store::infrastructure::util::DefaultSlugGenerator;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;

/// Test fixture schema; the crate itself never creates tables.
const SCHEMA: &[&str] = &[
    "CREATE TABLE users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL DEFAULT '',
        bio TEXT,
        image TEXT,
        created_at DATETIME,
        updated_at DATETIME,
        deleted_at DATETIME
    )",
    "CREATE TABLE articles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        slug TEXT NOT NULL UNIQUE,
        title TEXT NOT NULL,
        description TEXT,
        body TEXT,
        author_id INTEGER NOT NULL REFERENCES users(id),
        favorites_count INTEGER NOT NULL DEFAULT 0,
        created_at DATETIME,
        updated_at DATETIME,
        deleted_at DATETIME
    )",
    "CREATE TABLE tags (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT UNIQUE,
        created_at DATETIME,
        updated_at DATETIME,
        deleted_at DATETIME
    )",
    "CREATE TABLE article_tags (
        article_id INTEGER NOT NULL REFERENCES articles(id),
        tag_id INTEGER NOT NULL REFERENCES tags(id),
        PRIMARY KEY (article_id, tag_id)
    )",
    "CREATE TABLE favorite_articles (
        article_id INTEGER NOT NULL REFERENCES articles(id),
        user_id INTEGER NOT NULL REFERENCES users(id),
        PRIMARY KEY (article_id, user_id)
    )",
    "CREATE TABLE follows (
        from_user_id INTEGER NOT NULL REFERENCES users(id),
        to_user_id INTEGER NOT NULL REFERENCES users(id),
        PRIMARY KEY (from_user_id, to_user_id)
    )",
];

/// Single-connection in-memory database so every query sees the same schema.
pub async fn memory_pool() -> Arc<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory sqlite");

    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(&pool)
            .await
            .expect("create test schema");
    }

    Arc::new(pool)
}

pub struct SqliteStores {
    pub pool: Arc<SqlitePool>,
    pub users: UserStore,
    pub articles: ArticleStore,
}

pub async fn sqlite_stores() -> SqliteStores {
    let pool = memory_pool().await;
    let datasource: Arc<dyn Datasource> = Arc::new(SqliteDatasource::new(Arc::clone(&pool)));
    let clock: Arc<ClockPort> = Arc::new(FixedClock);
    let slugger: Arc<SlugGeneratorPort> = Arc::new(DefaultSlugGenerator);

    SqliteStores {
        users: UserStore::new(Arc::clone(&datasource), Arc::clone(&clock)),
        articles: ArticleStore::new(datasource, clock, slugger),
        pool,
    }
}

pub fn mock_user_store(datasource: &Arc<MockDatasource>) -> UserStore {
    UserStore::new(datasource.clone(), Arc::new(FixedClock))
}

pub fn mock_article_store(datasource: &Arc<MockDatasource>) -> ArticleStore {
    ArticleStore::new(
        datasource.clone(),
        Arc::new(FixedClock),
        Arc::new(DefaultSlugGenerator),
    )
}
