//! Storage selection.
//!
//! Opens the configured backend and hands back one repository for it. The
//! SQLite handle is kept alongside so it can be released on shutdown.

use crate::config::{StorageBackend, StorageConfig};
use crate::db::Database;
use crate::error::StorageError;
use crate::repository::{Entity, MemoryRepository, Repository};
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use std::sync::Arc;
use tracing::info;

/// An opened store and the repository over it.
pub struct Storage<T: Entity> {
    repository: Arc<dyn Repository<T>>,
    database: Option<Database>,
}

impl<T: Entity> Storage<T> {
    /// Open the backend named in `config`. For SQLite, `migrator` is applied
    /// first and `sqlite` builds the repository over the pool.
    pub async fn open<R, F>(
        config: &StorageConfig,
        migrator: &Migrator,
        sqlite: F,
    ) -> Result<Self, StorageError>
    where
        R: Repository<T> + 'static,
        F: FnOnce(SqlitePool) -> R,
    {
        match config.backend {
            StorageBackend::Sqlite => {
                let database = Database::new(&config.path, migrator).await?;
                let repository = sqlite(database.pool().clone());
                Ok(Self {
                    repository: Arc::new(repository),
                    database: Some(database),
                })
            }
            StorageBackend::Memory => {
                info!("Using in-memory storage; records are lost on exit");
                Ok(Self {
                    repository: Arc::new(MemoryRepository::<T>::new()),
                    database: None,
                })
            }
        }
    }

    pub fn repository(&self) -> Arc<dyn Repository<T>> {
        Arc::clone(&self.repository)
    }

    /// Release the underlying store.
    pub async fn close(self) {
        if let Some(database) = self.database {
            database.close().await;
        }
    }
}
