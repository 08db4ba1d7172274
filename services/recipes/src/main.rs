use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use foodgram_core::config::Config as _;
use foodgram_core::tracing::init_tracing;
use foodgram_recipes::config::RecipesConfig;
use foodgram_recipes::router::build_router;
use foodgram_recipes::state::AppState;
use foodgram_recipes_migration::{Migrator, MigratorTrait as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = RecipesConfig::from_env().context("load recipes config")?;
    init_tracing(config.log_format);

    let db = Database::connect(&config.database_url)
        .await
        .context("connect to database")?;

    if config.run_migrations {
        Migrator::up(&db, None).await.context("apply migrations")?;
        info!("migrations applied");
    }

    let router = build_router(AppState { db });
    let http_addr = format!("0.0.0.0:{}", config.recipes_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("bind {http_addr}"))?;

    info!("recipes service listening on {http_addr}");
    axum::serve(listener, router).await.context("serve http")?;
    Ok(())
}
