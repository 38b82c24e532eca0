//! Database module for persistent storage.
//!
//! Provides async SQLite access using SQLx. Each service embeds its own
//! migrations and hands them to [`Database::new`]; repositories then work off
//! the shared connection pool.

use crate::error::StorageError;
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::info;

static MEMDB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Path value that selects a private in-memory database.
pub const MEMORY_PATH: &str = ":memory:";

/// Database handle with connection pool.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

/// A store that cannot be opened counts as unreachable, whatever SQLite says.
fn unreachable_store(err: sqlx::Error) -> StorageError {
    StorageError::Unavailable(err.to_string())
}

impl Database {
    /// Connection acquire timeout - a dead store fails startup instead of hanging it.
    const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

    /// Maximum time a connection can remain idle before being closed.
    const IDLE_TIMEOUT: Duration = Duration::from_secs(60);

    /// Open a database and apply the given migrations.
    pub async fn new(path: &str, migrator: &Migrator) -> Result<Self, StorageError> {
        let pool = if path == MEMORY_PATH {
            // Uniquely named shared-cache memory database per call, so parallel
            // tests never see each other's rows.
            let id = MEMDB_COUNTER.fetch_add(1, Ordering::Relaxed);
            let memdb_uri = format!(
                "file:storefront-memdb-{}-{}?mode=memory&cache=shared",
                std::process::id(),
                id
            );

            let options = SqliteConnectOptions::new()
                .filename(&memdb_uri)
                .shared_cache(true)
                .create_if_missing(true);

            // The memory database lives only as long as one connection does,
            // so that connection is never reaped or recycled.
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .max_lifetime(None::<Duration>)
                .idle_timeout(None::<Duration>)
                .acquire_timeout(Self::ACQUIRE_TIMEOUT)
                .test_before_acquire(true)
                .connect_with(options)
                .await
                .map_err(unreachable_store)?
        } else {
            if let Some(parent) = Path::new(path).parent()
                && !parent.as_os_str().is_empty()
                && let Err(e) = std::fs::create_dir_all(parent)
            {
                tracing::warn!(path = %parent.display(), error = %e, "Failed to create database directory");
            }

            let options = SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true);

            SqlitePoolOptions::new()
                .max_connections(5)
                .acquire_timeout(Self::ACQUIRE_TIMEOUT)
                .idle_timeout(Some(Self::IDLE_TIMEOUT))
                .test_before_acquire(true)
                .connect_with(options)
                .await
                .map_err(unreachable_store)?
        };

        info!(path = %path, "Database connected");

        migrator.run(&pool).await?;
        info!("Database migrations checked/applied");

        // WAL lets the HTTP readers proceed while a write is in flight.
        sqlx::query("PRAGMA journal_mode=WAL")
            .execute(&pool)
            .await?;
        sqlx::query("PRAGMA synchronous=NORMAL")
            .execute(&pool)
            .await?;

        Ok(Self { pool })
    }

    /// Get reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection. Later queries fail with
    /// [`StorageError::Unavailable`].
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database closed");
    }

    /// Whether [`Database::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}
