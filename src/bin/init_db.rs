//! Create the posts table and fill an empty one with the sample posts.

use postboard::config::AppConfig;
use postboard::repo::sqlite::SqliteRepo;
use postboard::seed::seed_if_empty;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    if cfg!(debug_assertions) {
        let _ = dotenv::dotenv();
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cfg = AppConfig::from_env()?;
    let repo = SqliteRepo::connect(&cfg.database_url, 1).await?;
    info!(url = %cfg.database_url, "posts table ready");

    let inserted = seed_if_empty(&repo).await?;
    info!("inserted {inserted} sample posts");

    repo.close().await;
    info!("Database initialization completed successfully.");
    Ok(())
}
