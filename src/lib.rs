//! # Orchestrator Core
//!
//! Control-plane service that provisions and tears down isolated per-tenant
//! data partitions ("instances") inside a single shared PostgreSQL database.
//!
//! ## Overview
//!
//! Each instance is one logical tenant: a dedicated schema with a fixed table
//! layout (`users`, `messages`) plus a row in the central `core.instances`
//! registry tracking its lifecycle state. The registry row is authoritative
//! for whether a schema should exist; the physical schema is derived state.
//!
//! ## Architecture
//!
//! - [`identity`] - Instance naming: display token + schema identifier
//! - [`provisioner`] - DDL execution for per-instance schemas
//! - [`models`] - Registry row storage (`core.instances`)
//! - [`lifecycle`] - Transactional create/destroy coordination (the core)
//! - [`notifications`] - Fire-and-forget Signal notification client
//! - [`web`] - Axum HTTP surface
//! - [`database`] - Pool construction, SQLSTATE helpers, migrations
//! - [`config`] - Layered configuration loading
//!
//! Create and delete each execute as a single database transaction: schema
//! DDL and registry DML commit together or not at all. No application-level
//! locking is layered on top - the unique constraint on
//! `core.instances.schema_name` arbitrates concurrent creates.

pub mod config;
pub mod database;
pub mod error;
pub mod identity;
pub mod lifecycle;
pub mod logging;
pub mod models;
pub mod notifications;
pub mod provisioner;
pub mod web;

pub use config::{ConfigManager, DatabaseConfig, OrchestratorConfig, SignalConfig, WebConfig};
pub use error::{OrchestratorError, Result};
pub use identity::InstanceIdentity;
pub use lifecycle::{InstanceLifecycle, LifecycleError};
pub use models::instance::{Instance, InstanceState, NewInstance};
