use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::db::repositories::{FacilityStore, PgFacilityStore};
use crate::services::{CustomerDirectory, StorageAllocation};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub env: Config,
    pub directory: CustomerDirectory,
    pub storage: StorageAllocation,
}

impl AppState {
    pub fn new(db: PgPool, env: Config) -> Self {
        let store: Arc<dyn FacilityStore> = Arc::new(PgFacilityStore::new(db.clone()));
        Self {
            db,
            env,
            directory: CustomerDirectory::new(store.clone()),
            storage: StorageAllocation::new(store),
        }
    }
}
