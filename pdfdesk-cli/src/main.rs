//! pdfdesk CLI - todo and PDF CRUD service
//!
//! Entry point for:
//! - Running the HTTP API (`serve`)
//! - Managing the database schema (`migrate run|revert|status`)
//! - Inspecting resolved configuration (`config`)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

mod commands;
mod tracing_setup;

use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "pdfdesk",
    author,
    version,
    about = "CRUD API for todos and PDFs, backed by PostgreSQL and S3",
    long_about = "Serve the todo/PDF API, manage its database schema, and inspect the \
                  configuration resolved from the environment, .env and api.env."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Apply, revert, or inspect database migrations
    Migrate(commands::migrate::MigrateArgs),
    /// Show the resolved configuration (passwords redacted)
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Env files first: clap reads `env = ...` defaults while parsing
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let env_files = pdfdesk_core::config::load_env_files(&cwd)
        .context("Failed to load environment files")?;

    let cli = Cli::parse();
    if let Err(err) = init_tracing(&TracingConfig { debug: cli.debug }) {
        eprintln!("warning: logging disabled: {err:#}");
    }

    info!("{}", env_files.summary());
    debug!(?cli, "Parsed arguments");

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::Migrate(args) => commands::run_migrate(args).await,
        Commands::Config(args) => commands::run_config(args),
    }
}
