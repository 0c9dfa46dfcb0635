//! # Instance Lifecycle Manager
//!
//! Coordinates identity generation, schema provisioning and registry updates
//! inside one transaction per request. The registry row and the physical
//! schema change together or not at all:
//!
//! - create: `CREATE SCHEMA` + fixed tables, then the registry INSERT, then
//!   commit. Any failure rolls the whole unit back, so a failed create leaves
//!   neither a schema nor a row behind.
//! - delete: idempotent `DROP SCHEMA`, then the registry state transition,
//!   then commit. A delete that reports success has done both.
//!
//! Notifications go out only after a successful commit and never affect the
//! already-committed result.
//!
//! The manager is stateless between requests; the database transaction is the
//! sole concurrency discipline. Two creates racing on the same identifier are
//! arbitrated by the UNIQUE constraint on `core.instances.schema_name` - the
//! loser fails with [`LifecycleError::AlreadyExists`] and rolls back.

use sqlx::PgPool;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::database::error_codes::{sqlstate, PgErrorCode};
use crate::identity::{validate_schema_identifier, InstanceIdentity};
use crate::models::instance::{Instance, NewInstance};
use crate::notifications::SignalNotifier;
use crate::provisioner::{self, ProvisioningError};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("an instance with schema {0} already exists")]
    AlreadyExists(String),

    #[error("schema provisioning failed: {0}")]
    Provisioning(String),

    #[error("no registered instance for schema {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl LifecycleError {
    /// Classify a provisioning failure for a given identifier: duplicate
    /// namespaces collapse into `AlreadyExists`, everything else stays a
    /// provisioning failure.
    fn from_provisioning(err: ProvisioningError, schema_name: &str) -> Self {
        match err {
            ProvisioningError::InvalidIdentifier(msg) => LifecycleError::Validation(msg),
            ProvisioningError::Database(db) => match sqlstate(&db) {
                Some(code) if PgErrorCode::is_already_exists(&code) => {
                    LifecycleError::AlreadyExists(schema_name.to_string())
                }
                _ => LifecycleError::Provisioning(db.to_string()),
            },
        }
    }

    /// Classify a registry insert failure: a unique violation means the
    /// schema identifier lost a race with a concurrent create.
    fn from_registry_insert(err: sqlx::Error, schema_name: &str) -> Self {
        match sqlstate(&err) {
            Some(code) if PgErrorCode::is_unique_violation(&code) => {
                LifecycleError::AlreadyExists(schema_name.to_string())
            }
            _ => LifecycleError::Database(err),
        }
    }
}

/// Outcome of a successful create.
#[derive(Debug, Clone)]
pub struct CreatedInstance {
    /// Display token for notifications; not a lookup key
    pub name: String,
    pub schema_name: String,
}

/// The lifecycle manager. Owns an injected pool handle and the optional
/// notification sink; holds no other state between requests.
#[derive(Clone)]
pub struct InstanceLifecycle {
    pool: PgPool,
    notifier: Option<SignalNotifier>,
}

impl InstanceLifecycle {
    pub fn new(pool: PgPool, notifier: Option<SignalNotifier>) -> Self {
        Self { pool, notifier }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Provision a new instance: fresh identity, schema DDL and registry row
    /// in one transaction.
    #[instrument(skip(self))]
    pub async fn create_instance(&self) -> Result<CreatedInstance, LifecycleError> {
        let identity = InstanceIdentity::generate();
        self.create_instance_with_identity(identity).await
    }

    /// Provision an instance under a caller-supplied identity. Split out so
    /// tests can force identifier collisions deterministically.
    pub async fn create_instance_with_identity(
        &self,
        identity: InstanceIdentity,
    ) -> Result<CreatedInstance, LifecycleError> {
        let InstanceIdentity { name, schema_name } = identity;

        info!(schema_name = %schema_name, "creating instance");

        let mut tx = self.pool.begin().await?;

        if let Err(e) = provisioner::create_schema(&mut tx, &schema_name).await {
            tx.rollback().await.ok();
            return Err(LifecycleError::from_provisioning(e, &schema_name));
        }

        let new_instance = NewInstance {
            name: name.clone(),
            schema_name: schema_name.clone(),
        };
        if let Err(e) = Instance::insert(&mut tx, &new_instance).await {
            tx.rollback().await.ok();
            return Err(LifecycleError::from_registry_insert(e, &schema_name));
        }

        tx.commit().await?;

        info!(schema_name = %schema_name, "instance created");

        if let Some(notifier) = &self.notifier {
            notifier.notify_instance_created(&name);
        }

        Ok(CreatedInstance { name, schema_name })
    }

    /// Tear down an instance: drop the schema and mark the registry row
    /// deleted in one transaction.
    ///
    /// A `schema_name` the registry never issued is an error
    /// ([`LifecycleError::NotFound`]); the transaction rolls back, so the
    /// idempotent DROP performs no durable work in that case.
    #[instrument(skip(self))]
    pub async fn delete_instance(&self, schema_name: &str) -> Result<Instance, LifecycleError> {
        if schema_name.trim().is_empty() {
            return Err(LifecycleError::Validation(
                "schema identifier is required".to_string(),
            ));
        }
        validate_schema_identifier(schema_name).map_err(LifecycleError::Validation)?;

        info!(schema_name = %schema_name, "deleting instance");

        let mut tx = self.pool.begin().await?;

        if let Err(e) = provisioner::drop_schema(&mut tx, schema_name).await {
            tx.rollback().await.ok();
            return Err(LifecycleError::from_provisioning(e, schema_name));
        }

        let marked = match Instance::mark_deleted(&mut tx, schema_name).await {
            Ok(marked) => marked,
            Err(e) => {
                tx.rollback().await.ok();
                return Err(LifecycleError::Database(e));
            }
        };

        let Some(instance) = marked else {
            tx.rollback().await.ok();
            warn!(schema_name = %schema_name, "delete requested for unknown instance");
            return Err(LifecycleError::NotFound(schema_name.to_string()));
        };

        tx.commit().await?;

        info!(schema_name = %schema_name, "instance deleted");

        if let Some(notifier) = &self.notifier {
            notifier.notify_instance_deleted();
        }

        Ok(instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_identifier_is_a_validation_error() {
        let err = LifecycleError::from_provisioning(
            ProvisioningError::InvalidIdentifier("bad".to_string()),
            "instance_1",
        );
        assert!(matches!(err, LifecycleError::Validation(_)));
    }

    #[test]
    fn test_error_messages_are_actionable() {
        let err = LifecycleError::NotFound("instance_12345".to_string());
        assert_eq!(
            err.to_string(),
            "no registered instance for schema instance_12345"
        );

        let err = LifecycleError::AlreadyExists("instance_12345".to_string());
        assert!(err.to_string().contains("already exists"));
    }
}
