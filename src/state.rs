//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::storage::BlobStore;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub storage: BlobStore,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let storage = BlobStore::new(config.upload_dir.clone());
        Self {
            pool,
            config,
            storage,
        }
    }
}
