//! # Database Migration Support
//!
//! Embedded migrator over the `migrations/` directory. The registry schema
//! (`core.instances`) is owned by this crate, so the service bootstraps it on
//! startup rather than assuming someone created it out of band.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use orchestrator_core::database::MIGRATOR;
//!
//! MIGRATOR.run(&pool).await?;
//! ```
//!
//! Tests get a migrated, isolated database per test:
//!
//! ```rust,ignore
//! #[sqlx::test(migrator = "orchestrator_core::database::MIGRATOR")]
//! async fn test_feature(pool: PgPool) { /* ... */ }
//! ```

use sqlx::PgPool;
use tracing::info;

/// Migrator embedding all migrations from `migrations/` at compile time.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Run all pending migrations, logging the applied version count.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await?;
    info!(
        migrations = MIGRATOR.migrations.len(),
        "database migrations up to date"
    );
    Ok(())
}
