//! Load the ingredient catalog from a JSON file:
//! `[{"name": "Flour", "measurement_unit": "g"}, ...]`.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use sea_orm::Database;
use tracing::info;

use foodgram_core::config::Config as _;
use foodgram_core::tracing::init_tracing;
use foodgram_recipes::config::RecipesConfig;
use foodgram_recipes::domain::types::NewIngredient;
use foodgram_recipes::infra::db::DbIngredientRepository;
use foodgram_recipes::usecase::ingredient::ImportIngredientsUseCase;

#[derive(Debug, Parser)]
#[command(name = "import-ingredients", about = "Import ingredients into the catalog")]
struct Args {
    /// Path to a JSON array of `{name, measurement_unit}` objects.
    #[arg(long, short)]
    file: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = RecipesConfig::from_env().context("load recipes config")?;
    init_tracing(config.log_format);

    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("read {}", args.file.display()))?;
    let items: Vec<NewIngredient> =
        serde_json::from_str(&raw).with_context(|| format!("parse {}", args.file.display()))?;

    let db = Database::connect(&config.database_url)
        .await
        .context("connect to database")?;
    let uc = ImportIngredientsUseCase {
        ingredients: DbIngredientRepository { db },
    };
    let inserted = uc.execute(items).await.context("import ingredients")?;

    info!(inserted, file = %args.file.display(), "ingredient import finished");
    Ok(())
}
