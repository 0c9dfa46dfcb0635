use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::{debug, warn};

use crate::config::{masked_database_url, DatabaseConfig, OrchestratorConfig};

/// Owns the shared connection pool. Constructed once at startup and injected
/// into every component that talks to the database; nothing in this crate
/// reaches for a global pool.
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Build a pool from configuration.
    pub async fn connect(config: &OrchestratorConfig) -> Result<Self, sqlx::Error> {
        let database_url = config.database_url();
        let pool = Self::build_pool(&config.database, &database_url).await?;
        Ok(Self { pool })
    }

    async fn build_pool(db: &DatabaseConfig, database_url: &str) -> Result<PgPool, sqlx::Error> {
        debug!(
            url = %masked_database_url(database_url),
            max_connections = db.max_connections,
            acquire_timeout_seconds = db.acquire_timeout_seconds,
            idle_timeout_seconds = db.idle_timeout_seconds,
            "creating database pool"
        );

        PgPoolOptions::new()
            .max_connections(db.max_connections)
            .acquire_timeout(db.acquire_timeout())
            .idle_timeout(db.idle_timeout())
            .connect(database_url)
            .await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Cheap connectivity ping.
    pub async fn health_check(&self) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 as health").fetch_one(&self.pool).await?;
        let health: i32 = row.get("health");
        Ok(health == 1)
    }

    /// Startup connectivity probe: logs the outcome but never refuses to
    /// start the service, so the API stays up while the database recovers.
    pub async fn probe_on_startup(&self) {
        match self.health_check().await {
            Ok(_) => tracing::info!("connected to database"),
            Err(e) => warn!(error = %e, "could not reach database at startup; continuing"),
        }
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}
