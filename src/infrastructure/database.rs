use crate::config::AppConfig;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

/// Every pooled connection is opened with foreign keys enforced.
pub async fn init_pool(config: &AppConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(config.database_url())?.foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections())
        .connect_with(options)
        .await
}
