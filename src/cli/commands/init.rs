use anyhow::Context;

use crate::cli::{Service, Target};
use crate::config::config;
use crate::database::DatabaseManager;

pub async fn handle(target: Target, samples: bool) -> anyhow::Result<()> {
    let config = config();
    anyhow::ensure!(config.database.url.is_some(), "DATABASE_URL must be set to initialize databases");

    if target.includes(Service::Trivia) {
        let pool = DatabaseManager::connect(&config.database, &config.database.trivia_db)
            .await
            .context("failed to connect to the trivia database")?;
        DatabaseManager::migrate_trivia(&pool, samples).await?;
        pool.close().await;
        println!("Initialized trivia database '{}'", config.database.trivia_db);
    }

    if target.includes(Service::Coffee) {
        let pool = DatabaseManager::connect(&config.database, &config.database.coffee_db)
            .await
            .context("failed to connect to the coffee database")?;
        DatabaseManager::migrate_coffee(&pool, samples).await?;
        pool.close().await;
        println!("Initialized coffee database '{}'", config.database.coffee_db);
    }

    Ok(())
}
