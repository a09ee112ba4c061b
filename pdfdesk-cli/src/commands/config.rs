//! Show resolved configuration

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

use pdfdesk_core::config::{settings, DatabaseSource};

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Print as JSON instead of plain text
    #[arg(long)]
    pub json: bool,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    let settings = settings()
        .context("Database is not configured. Set DATABASE_URL, or DATABASE_USER and DATABASE_NAME")?;

    let source = match &settings.database.source {
        DatabaseSource::Url => "DATABASE_URL",
        DatabaseSource::Parts { .. } => "DATABASE_* parts",
    };
    let database_url = settings.database.redacted_url();
    let store = settings.object_store.as_ref();

    if args.json {
        let value = json!({
            "database": {
                "url": database_url,
                "source": source,
            },
            "object_store": store.map(|s| json!({
                "bucket": s.bucket,
                "region": s.region,
                "endpoint": s.endpoint,
            })),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("database.url      {}", database_url);
    println!("database.source   {}", source);
    match store {
        Some(s) => {
            println!("object_store      s3://{}", s.bucket);
            if let Some(region) = &s.region {
                println!("object_store.region   {}", region);
            }
            if let Some(endpoint) = &s.endpoint {
                println!("object_store.endpoint {}", endpoint);
            }
        }
        None => println!("object_store      (not configured; uploads disabled)"),
    }

    Ok(())
}
