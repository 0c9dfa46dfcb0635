//! # Schema Provisioner
//!
//! Executes the DDL that creates or drops a per-instance namespace and its
//! fixed table set. Every operation runs inside the caller's transaction -
//! the provisioner never opens its own, so registry and schema changes
//! commit or roll back together.
//!
//! Namespace identifiers cannot be bound as query parameters, so both entry
//! points re-validate the identifier against the allow-list before any DDL
//! string is assembled.

use sqlx::{Postgres, Transaction};
use thiserror::Error;
use tracing::debug;

use crate::identity::validate_schema_identifier;

#[derive(Debug, Error)]
pub enum ProvisioningError {
    #[error("invalid schema identifier: {0}")]
    InvalidIdentifier(String),

    #[error("DDL execution failed: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create the namespace and its fixed table set.
///
/// Strict create: if the namespace already exists the DDL fails (SQLSTATE
/// 42P06) and the enclosing transaction aborts. A colliding identifier must
/// never silently merge into an existing tenant's schema.
pub async fn create_schema(
    tx: &mut Transaction<'_, Postgres>,
    schema_name: &str,
) -> Result<(), ProvisioningError> {
    validate_schema_identifier(schema_name).map_err(ProvisioningError::InvalidIdentifier)?;

    debug!(schema_name = %schema_name, "creating instance schema");

    sqlx::query(&format!("CREATE SCHEMA {schema_name}"))
        .execute(&mut **tx)
        .await?;

    sqlx::query(&format!(
        "CREATE TABLE {schema_name}.users (
            id SERIAL PRIMARY KEY,
            username TEXT NOT NULL,
            created_at TIMESTAMP DEFAULT NOW()
        )"
    ))
    .execute(&mut **tx)
    .await?;

    sqlx::query(&format!(
        "CREATE TABLE {schema_name}.messages (
            id SERIAL PRIMARY KEY,
            user_id INT REFERENCES {schema_name}.users(id),
            content TEXT NOT NULL,
            created_at TIMESTAMP DEFAULT NOW()
        )"
    ))
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Drop the namespace and everything in it.
///
/// Unconditional and idempotent: `IF EXISTS ... CASCADE`, so dropping an
/// absent namespace is not an error and dependent objects never block the
/// teardown.
pub async fn drop_schema(
    tx: &mut Transaction<'_, Postgres>,
    schema_name: &str,
) -> Result<(), ProvisioningError> {
    validate_schema_identifier(schema_name).map_err(ProvisioningError::InvalidIdentifier)?;

    debug!(schema_name = %schema_name, "dropping instance schema");

    sqlx::query(&format!("DROP SCHEMA IF EXISTS {schema_name} CASCADE"))
        .execute(&mut **tx)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_identifier_maps_to_provisioning_error() {
        // The validator runs before any database work, so a malformed
        // identifier fails without a connection.
        let err = validate_schema_identifier("bad name").unwrap_err();
        assert!(ProvisioningError::InvalidIdentifier(err)
            .to_string()
            .contains("invalid schema identifier"));
    }
}
