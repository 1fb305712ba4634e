use anyhow::Result;
use realworld_store::application::ports::{ClockPort, SlugGeneratorPort};
use realworld_store::config::AppConfig;
use realworld_store::domain::article::ArticleRepository;
use realworld_store::infrastructure::{
    database,
    datasource::{Datasource, SqliteDatasource},
    repositories::ArticleStore,
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = Arc::new(database::init_pool(&config).await?);
    let datasource: Arc<dyn Datasource> = Arc::new(SqliteDatasource::new(Arc::clone(&pool)));
    let clock: Arc<ClockPort> = Arc::new(SystemClock);
    let slugger: Arc<SlugGeneratorPort> = Arc::new(DefaultSlugGenerator);

    let articles = ArticleStore::new(datasource, clock, slugger);

    let tags = articles.tags().await?;
    tracing::info!(
        database = config.database_url(),
        tags = tags.len(),
        "stores ready"
    );

    pool.close().await;
    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}
