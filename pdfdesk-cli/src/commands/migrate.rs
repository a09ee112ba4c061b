//! Database migration command

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use pdfdesk_server::db::{create_pool, migrations};

use super::database_settings;

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides DATABASE_* variables)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true, global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: MigrateCommands,
}

#[derive(Subcommand, Debug)]
pub enum MigrateCommands {
    /// Apply all pending migrations
    Run,
    /// Revert the most recently applied migration
    Revert,
    /// List migrations and whether each one is applied
    Status,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let database = database_settings(args.database_url)?;
    tracing::info!(url = %database.redacted_url(), "Connecting to database");

    let pool = create_pool(&database.url)
        .await
        .context("Failed to connect to database")?;

    match args.command {
        MigrateCommands::Run => {
            migrations::run(&pool)
                .await
                .context("Failed to apply migrations")?;
            println!("Migrations applied");
        }
        MigrateCommands::Revert => {
            let reverted = migrations::revert_latest(&pool)
                .await
                .context("Failed to revert migration")?;
            match reverted {
                Some(version) => println!("Reverted migration {}", version),
                None => println!("Nothing to revert"),
            }
        }
        MigrateCommands::Status => {
            let statuses = migrations::status(&pool)
                .await
                .context("Failed to read migration status")?;
            for m in statuses {
                let state = if m.applied { "applied" } else { "pending" };
                println!("{:<16} {:<8} {}", m.version, state, m.description);
            }
        }
    }

    pool.close().await;
    Ok(())
}
