//! PostgreSQL pool for the todo and PDF repositories

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Pool sizing and wait limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Upper bound on open connections
    pub max_connections: u32,
    /// How long a request waits for a free connection before failing
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout: Duration::from_secs(10),
        }
    }
}

impl PoolConfig {
    /// Open a pool against `database_url` and verify one connection.
    pub async fn connect(&self, database_url: &str) -> Result<PgPool, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
            .connect(database_url)
            .await?;

        tracing::debug!(
            max_connections = self.max_connections,
            "Database pool ready"
        );
        Ok(pool)
    }
}

/// Open a pool with [`PoolConfig::default`].
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PoolConfig::default().connect(database_url).await
}
