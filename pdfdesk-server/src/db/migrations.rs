//! Embedded SQL migrations for the `todos` and `pdfs` tables.
//!
//! The migration files live in the workspace `migrations/` directory and are
//! compiled into the binary, so `serve` and `migrate` always agree on the
//! schema version.

use sqlx::migrate::Migrator;
use sqlx::PgPool;

use crate::error::Result;

pub static MIGRATOR: Migrator = sqlx::migrate!("../migrations");

/// One embedded migration and whether the database has applied it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    pub version: i64,
    pub description: String,
    pub applied: bool,
}

/// Apply all pending migrations.
pub async fn run(pool: &PgPool) -> Result<()> {
    tracing::info!("Running migrations...");
    MIGRATOR.run(pool).await?;
    tracing::info!("Migrations up to date");
    Ok(())
}

/// Versions recorded as successfully applied, ascending.
async fn applied_versions(pool: &PgPool) -> Result<Vec<i64>> {
    let has_table: bool =
        sqlx::query_scalar("SELECT to_regclass('public._sqlx_migrations') IS NOT NULL")
            .fetch_one(pool)
            .await?;
    if !has_table {
        return Ok(Vec::new());
    }

    let versions = sqlx::query_scalar(
        "SELECT version FROM _sqlx_migrations WHERE success = TRUE ORDER BY version",
    )
    .fetch_all(pool)
    .await?;
    Ok(versions)
}

/// Embedded migrations paired with their applied state.
pub async fn status(pool: &PgPool) -> Result<Vec<MigrationStatus>> {
    let applied = applied_versions(pool).await?;
    Ok(MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .map(|m| MigrationStatus {
            version: m.version,
            description: m.description.to_string(),
            applied: applied.contains(&m.version),
        })
        .collect())
}

/// Revert the most recently applied migration.
///
/// Returns the reverted version, or `None` when nothing is applied.
pub async fn revert_latest(pool: &PgPool) -> Result<Option<i64>> {
    let applied = applied_versions(pool).await?;
    let Some((&latest, rest)) = applied.split_last() else {
        tracing::info!("No applied migrations to revert");
        return Ok(None);
    };
    let target = rest.last().copied().unwrap_or(0);

    tracing::info!(version = latest, "Reverting migration");
    MIGRATOR.undo(pool, target).await?;
    Ok(Some(latest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool;

    #[test]
    fn embedded_migrations_are_reversible() {
        let ups: Vec<_> = MIGRATOR
            .iter()
            .filter(|m| !m.migration_type.is_down_migration())
            .collect();
        assert_eq!(ups.len(), 2);
        assert!(ups.iter().all(|m| m.migration_type.is_reversible()));
        assert!(ups.windows(2).all(|w| w[0].version < w[1].version));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn revert_then_run_round_trips() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL not set");
        let pool = create_pool(&url).await.expect("pool");

        run(&pool).await.expect("run");
        assert!(status(&pool).await.unwrap().iter().all(|m| m.applied));

        let reverted = revert_latest(&pool).await.unwrap();
        assert!(reverted.is_some());
        let after = status(&pool).await.unwrap();
        assert!(!after.last().unwrap().applied);

        run(&pool).await.expect("re-run");
    }
}
