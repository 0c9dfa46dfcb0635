//! PostgreSQL Error Codes
//!
//! Constants for the PostgreSQL SQLSTATE codes this crate classifies on.
//! SQLSTATE codes are 5 characters: the first 2 identify the error class,
//! the last 3 the specific condition.
//!
//! Full list: <https://www.postgresql.org/docs/current/errcodes-appendix.html>

/// PostgreSQL SQLSTATE error codes
///
/// Only codes actively used in the codebase are included; add more as needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PgErrorCode;

impl PgErrorCode {
    /// Unique violation (duplicate key) - Code 23505
    ///
    /// Raised when an INSERT would violate a unique constraint. Two
    /// concurrent creates racing on the same `schema_name` resolve here:
    /// the loser's transaction aborts with this code.
    pub const UNIQUE_VIOLATION: &'static str = "23505";

    /// Foreign key violation - Code 23503
    pub const FOREIGN_KEY_VIOLATION: &'static str = "23503";

    /// Duplicate schema - Code 42P06
    ///
    /// Raised by `CREATE SCHEMA` when the namespace already exists. A
    /// duplicate schema identifier must abort the enclosing transaction, so
    /// this is classified alongside [`Self::UNIQUE_VIOLATION`].
    pub const DUPLICATE_SCHEMA: &'static str = "42P06";

    /// Invalid schema name - Code 3F000
    ///
    /// Raised when a statement references a schema that does not exist.
    pub const INVALID_SCHEMA_NAME: &'static str = "3F000";

    /// Serialization failure - Code 40001
    pub const SERIALIZATION_FAILURE: &'static str = "40001";

    /// Deadlock detected - Code 40P01
    pub const DEADLOCK_DETECTED: &'static str = "40P01";

    /// Check if the error code is a unique constraint violation
    #[inline]
    pub fn is_unique_violation(code: &str) -> bool {
        code == Self::UNIQUE_VIOLATION
    }

    /// Check if the error code means the instance already exists, whichever
    /// half of the registry/schema pairing tripped first
    #[inline]
    pub fn is_already_exists(code: &str) -> bool {
        code == Self::UNIQUE_VIOLATION || code == Self::DUPLICATE_SCHEMA
    }

    /// Check if the error code is any integrity constraint violation (Class 23)
    #[inline]
    pub fn is_integrity_constraint_violation(code: &str) -> bool {
        code.starts_with("23")
    }

    /// Check if the error is a transaction-level conflict the caller may retry
    #[inline]
    pub fn is_retryable_transaction_error(code: &str) -> bool {
        code == Self::SERIALIZATION_FAILURE || code == Self::DEADLOCK_DETECTED
    }
}

/// Extract the SQLSTATE code from a sqlx error, if it carries one.
pub fn sqlstate(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().map(|c| c.into_owned()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_detection() {
        assert!(PgErrorCode::is_unique_violation("23505"));
        assert!(!PgErrorCode::is_unique_violation("23503"));
        assert!(!PgErrorCode::is_unique_violation("42P06"));
    }

    #[test]
    fn test_already_exists_covers_both_halves() {
        assert!(PgErrorCode::is_already_exists("23505"));
        assert!(PgErrorCode::is_already_exists("42P06"));
        assert!(!PgErrorCode::is_already_exists("3F000"));
    }

    #[test]
    fn test_integrity_constraint_class() {
        assert!(PgErrorCode::is_integrity_constraint_violation("23505"));
        assert!(PgErrorCode::is_integrity_constraint_violation("23503"));
        assert!(!PgErrorCode::is_integrity_constraint_violation("40001"));
    }

    #[test]
    fn test_retryable_errors() {
        assert!(PgErrorCode::is_retryable_transaction_error("40001"));
        assert!(PgErrorCode::is_retryable_transaction_error("40P01"));
        assert!(!PgErrorCode::is_retryable_transaction_error("23505"));
    }
}
