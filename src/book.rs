//! Wiring of the SQLite store into a [`ContactService`].

use std::sync::Arc;

use anyhow::Result;
use sqlx::SqlitePool;

use contact_book_core::clock::Clock;
use contact_book_core::service::ContactService;

use crate::config::Config;
use crate::db;
use crate::sqlite_store::SqliteStore;

/// An open database plus the service running on it.
pub struct Book {
    pool: SqlitePool,
    service: ContactService,
}

impl Book {
    pub async fn open(config: &Config, clock: Arc<dyn Clock>) -> Result<Self> {
        let pool = db::connect(config).await?;
        Ok(Self::from_pool(pool, clock))
    }

    pub fn from_pool(pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        let store = SqliteStore::new(pool.clone());
        Self {
            pool,
            service: ContactService::new(Arc::new(store), clock),
        }
    }

    pub fn service(&self) -> &ContactService {
        &self.service
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}
