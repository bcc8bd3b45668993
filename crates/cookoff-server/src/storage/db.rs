//! Database handle for the ratings table.

use std::path::Path;

use sqlx::{Pool, Sqlite};
use tracing::info;

use cookoff_core::DatabaseError;
use cookoff_core::db::{open_pool, open_pool_in_memory};

/// Connection pool plus migrations for the ratings database.
#[derive(Clone)]
pub struct RatingsDatabase {
    pool: Pool<Sqlite>,
}

impl RatingsDatabase {
    /// Open or create the ratings database at the given path.
    pub async fn open(path: &Path) -> Result<Self, DatabaseError> {
        let pool = open_pool(path).await?;
        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    /// Open an in-memory ratings database (for testing).
    pub async fn open_in_memory() -> Result<Self, DatabaseError> {
        let pool = open_pool_in_memory().await?;
        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    async fn run_migrations(&self) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DatabaseError::Migration(e.to_string()))?;

        info!("Ratings database migrations complete");
        Ok(())
    }

    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}
