use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use crate::app::{coffee_app, trivia_app};
use crate::auth::AuthGate;
use crate::cli::Service;
use crate::config::{config, AppConfig, Environment};
use crate::database::models::{Category, Drink, Question};
use crate::database::{seed, DatabaseManager, MemoryStore, PgCategoryStore, PgDrinkStore, PgQuestionStore};
use crate::state::{CoffeeState, TriviaState};

pub async fn handle(service: Service, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let config = config();
    info!("Starting {:?} API in {:?} mode", service, config.environment);

    let (app, default_port) = match service {
        Service::Trivia => (trivia_app(trivia_state(config).await?, &config.security), config.server.trivia_port),
        Service::Coffee => (coffee_app(coffee_state(config).await?, &config.security), config.server.coffee_port),
    };

    let bind_addr = format!(
        "{}:{}",
        host.unwrap_or_else(|| config.server.host.clone()),
        port.unwrap_or(default_port)
    );
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("{:?} API listening on http://{}", service, bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

fn require_database(config: &AppConfig) -> anyhow::Result<()> {
    anyhow::ensure!(
        config.database.url.is_some() || config.environment != Environment::Production,
        "DATABASE_URL is required in production"
    );
    Ok(())
}

async fn trivia_state(config: &AppConfig) -> anyhow::Result<TriviaState> {
    require_database(config)?;
    let questions_per_page = config.trivia.questions_per_page;

    if config.database.url.is_none() {
        warn!("DATABASE_URL not set; serving trivia from an in-memory store with sample data");
        return Ok(TriviaState {
            questions: Arc::new(MemoryStore::<Question>::seeded(seed::questions())),
            categories: Arc::new(MemoryStore::<Category>::seeded(seed::categories())),
            questions_per_page,
        });
    }

    let pool = DatabaseManager::connect(&config.database, &config.database.trivia_db).await?;
    DatabaseManager::migrate_trivia(&pool, false).await?;

    Ok(TriviaState {
        questions: Arc::new(PgQuestionStore::new(pool.clone())),
        categories: Arc::new(PgCategoryStore::new(pool)),
        questions_per_page,
    })
}

async fn coffee_state(config: &AppConfig) -> anyhow::Result<CoffeeState> {
    require_database(config)?;
    let gate = Arc::new(AuthGate::from_config(&config.auth).context("invalid auth configuration")?);
    info!(issuer = %config.auth.issuer(), audience = %config.auth.audience, "Auth gate configured");

    if config.database.url.is_none() {
        warn!("DATABASE_URL not set; serving drinks from an in-memory store");
        return Ok(CoffeeState {
            drinks: Arc::new(MemoryStore::<Drink>::seeded(seed::drinks())),
            gate,
        });
    }

    let pool = DatabaseManager::connect(&config.database, &config.database.coffee_db).await?;
    DatabaseManager::migrate_coffee(&pool, false).await?;

    Ok(CoffeeState {
        drinks: Arc::new(PgDrinkStore::new(pool)),
        gate,
    })
}
