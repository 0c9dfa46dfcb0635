//! # Web API Application State
//!
//! Shared state for the web API: configuration, the injected database pool
//! and the lifecycle manager. Cheap to clone; every request handler gets a
//! copy.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::OrchestratorConfig;
use crate::lifecycle::InstanceLifecycle;
use crate::notifications::SignalNotifier;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<OrchestratorConfig>,
    pub db_pool: PgPool,
    pub lifecycle: Arc<InstanceLifecycle>,
}

impl AppState {
    /// Assemble application state around an already-constructed pool.
    ///
    /// The pool is built once at startup (see the server binary) and handed
    /// in; no component constructs or owns a pool of its own.
    pub fn new(config: OrchestratorConfig, db_pool: PgPool) -> Self {
        let notifier = SignalNotifier::from_config(&config.signal);
        let lifecycle = Arc::new(InstanceLifecycle::new(db_pool.clone(), notifier));
        Self {
            config: Arc::new(config),
            db_pool,
            lifecycle,
        }
    }
}
