//! Orchestrator server binary.
//!
//! Loads configuration, initializes logging, builds the database pool, runs
//! migrations, then serves the HTTP API.

use anyhow::Context;
use tracing::info;

use orchestrator_core::config::{masked_database_url, ConfigManager};
use orchestrator_core::database::{migrator, DatabaseConnection};
use orchestrator_core::logging::init_structured_logging;
use orchestrator_core::web::{create_app, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_structured_logging();

    let manager = ConfigManager::load().context("failed to load configuration")?;
    let config = manager.config().clone();

    info!(
        environment = manager.environment(),
        database = %masked_database_url(&config.database_url()),
        "starting orchestrator"
    );

    let connection = DatabaseConnection::connect(&config)
        .await
        .context("failed to create database pool")?;

    migrator::run_migrations(connection.pool())
        .await
        .context("failed to run database migrations")?;

    connection.probe_on_startup().await;

    let bind = config.web.bind();
    let app = create_app(AppState::new(config, connection.pool().clone()));

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;

    info!(bind = %bind, "orchestrator listening");

    axum::serve(listener, app)
        .await
        .context("server terminated unexpectedly")?;

    Ok(())
}
