use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use thiserror::Error;

/// Lifecycle state of a registry row. Stored in the legacy `estado` column as
/// lowercase text; the name never leaks past this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceState {
    Active,
    Deleted,
}

impl InstanceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceState::Active => "active",
            InstanceState::Deleted => "deleted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown instance state: {0}")]
pub struct UnknownState(String);

impl TryFrom<String> for InstanceState {
    type Error = UnknownState;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "active" => Ok(InstanceState::Active),
            "deleted" => Ok(InstanceState::Deleted),
            _ => Err(UnknownState(value)),
        }
    }
}

/// Instance represents one tenant partition registered in `core.instances`.
///
/// The registry row is the source of truth for whether the physical schema
/// should exist; a row with `state = Active` implies the schema exists with
/// the fixed table set, and `state = Deleted` implies it does not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Instance {
    pub id: i32,
    pub name: String,
    pub schema_name: String,
    #[sqlx(try_from = "String")]
    pub state: InstanceState,
    pub created_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

/// New Instance for registration (without generated fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInstance {
    pub name: String,
    pub schema_name: String,
}

const INSTANCE_COLUMNS: &str = "id, name, schema_name, estado AS state, created_at, deleted_at";

impl Instance {
    /// Register an active instance inside the caller's transaction.
    ///
    /// The UNIQUE constraint on `schema_name` surfaces a duplicate as a
    /// database error (SQLSTATE 23505), aborting the enclosing transaction.
    pub async fn insert(
        tx: &mut Transaction<'_, Postgres>,
        new_instance: &NewInstance,
    ) -> Result<Instance, sqlx::Error> {
        let sql = format!(
            "INSERT INTO core.instances (name, schema_name, estado, created_at) \
             VALUES ($1, $2, 'active', NOW()) \
             RETURNING {INSTANCE_COLUMNS}"
        );
        sqlx::query_as::<_, Instance>(&sql)
            .bind(&new_instance.name)
            .bind(&new_instance.schema_name)
            .fetch_one(&mut **tx)
            .await
    }

    /// Transition an active row to deleted and stamp `deleted_at`, inside the
    /// caller's transaction. Returns `None` when no active row matches; the
    /// caller decides whether that is fatal.
    ///
    /// Matching on `estado = 'active'` means a deleted row can never be
    /// re-deleted or overwritten, so there is no transition out of `deleted`.
    pub async fn mark_deleted(
        tx: &mut Transaction<'_, Postgres>,
        schema_name: &str,
    ) -> Result<Option<Instance>, sqlx::Error> {
        let sql = format!(
            "UPDATE core.instances \
             SET estado = 'deleted', deleted_at = NOW() \
             WHERE schema_name = $1 AND estado = 'active' \
             RETURNING {INSTANCE_COLUMNS}"
        );
        sqlx::query_as::<_, Instance>(&sql)
            .bind(schema_name)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Find a registry row by its schema identifier.
    pub async fn find_by_schema_name(
        pool: &PgPool,
        schema_name: &str,
    ) -> Result<Option<Instance>, sqlx::Error> {
        let sql = format!("SELECT {INSTANCE_COLUMNS} FROM core.instances WHERE schema_name = $1");
        sqlx::query_as::<_, Instance>(&sql)
            .bind(schema_name)
            .fetch_optional(pool)
            .await
    }

    /// Count rows currently in the given state.
    pub async fn count_in_state(
        pool: &PgPool,
        state: InstanceState,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM core.instances WHERE estado = $1")
            .bind(state.as_str())
            .fetch_one(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_round_trip() {
        assert_eq!(
            InstanceState::try_from("active".to_string()),
            Ok(InstanceState::Active)
        );
        assert_eq!(
            InstanceState::try_from("deleted".to_string()),
            Ok(InstanceState::Deleted)
        );
        assert_eq!(
            InstanceState::try_from("archived".to_string()),
            Err(UnknownState("archived".to_string()))
        );
    }

    #[test]
    fn test_state_as_str_matches_storage_values() {
        assert_eq!(InstanceState::Active.as_str(), "active");
        assert_eq!(InstanceState::Deleted.as_str(), "deleted");
    }
}
