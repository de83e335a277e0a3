use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db;
use crate::services::{CredentialNotifier, LogNotifier};

/// Server state - shared references held by every handler
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | config | Config | configuration (immutable) |
/// | db | Surreal<Db> | embedded document store handle |
/// | notifier | Arc<dyn CredentialNotifier> | credential delivery channel |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub notifier: Arc<dyn CredentialNotifier>,
}

impl ServerState {
    /// Initialize all services from the configuration.
    ///
    /// Opens the embedded store under the work directory and declares
    /// the schema. Panics on a failed bootstrap - the process cannot
    /// serve without its store.
    pub async fn initialize(config: &Config) -> Self {
        let db = db::connect(&config.work_dir)
            .await
            .expect("Failed to initialize database");

        Self {
            config: config.clone(),
            db,
            notifier: Arc::new(LogNotifier),
        }
    }

    /// Build a state around an existing store handle (tests, embedded
    /// callers).
    pub fn with_db(config: Config, db: Surreal<Db>, notifier: Arc<dyn CredentialNotifier>) -> Self {
        Self {
            config,
            db,
            notifier,
        }
    }
}
