use anyhow::{Context, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;
use std::time::Duration;

pub use sqlx; // Re-export for convenience
pub mod repositories;

pub use repositories::OutletRepository;

#[derive(Clone)]
pub struct Database {
    pub pool: PgPool,
}

impl Database {
    fn pool_options() -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(3)) // Fail fast if DB is overloaded
            .idle_timeout(Duration::from_secs(60 * 5)) // Close idle connections after 5m
            .test_before_acquire(true) // Health check on checkout
    }

    /// Connects eagerly, failing now if the database is unreachable.
    pub async fn connect(database_url: &str) -> Result<Arc<Self>> {
        let pool = Self::pool_options()
            .connect(database_url)
            .await
            .context("Failed to connect to the database")?;

        Ok(Arc::new(Self { pool }))
    }

    /// Defers connecting to the first request, which then reports the
    /// repository as unavailable instead of the process refusing to start.
    pub fn connect_lazy(database_url: &str) -> Result<Arc<Self>> {
        let pool = Self::pool_options()
            .connect_lazy(database_url)
            .context("Invalid database URL")?;

        Ok(Arc::new(Self { pool }))
    }

    /// Runs pending migrations. Safe to run on startup due to Postgres advisory locks.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("src/migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;

        Ok(())
    }
}
