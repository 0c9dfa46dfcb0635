//! # Database Layer
//!
//! Pool construction, SQLSTATE classification helpers, and schema migrations
//! for the shared PostgreSQL database.

pub mod connection;
pub mod error_codes;
pub mod migrator;

pub use connection::DatabaseConnection;
pub use error_codes::PgErrorCode;
pub use migrator::MIGRATOR;
