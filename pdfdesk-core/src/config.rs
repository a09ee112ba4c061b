//! Configuration resolution
//!
//! Every entry point (the HTTP server and the migration tool) resolves the
//! database target through [`DatabaseSettings::resolve`], so both always agree
//! on which store they talk to.
//!
//! Environment variables:
//!   DATABASE_URL                     # Full connection string, wins when set
//!   DATABASE_USER / DATABASE_NAME    # Required when DATABASE_URL is absent
//!   DATABASE_PASSWORD                # Default: empty
//!   DATABASE_HOST                    # Default: localhost
//!   DATABASE_PORT                    # Default: 5432
//!   AWS_S3_BUCKET                    # Enables PDF uploads
//!   AWS_REGION / AWS_DEFAULT_REGION  # Optional region override
//!   AWS_S3_ENDPOINT                  # Optional S3-compatible endpoint

use std::env;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use url::Url;

use crate::error::{CoreError, Result};

/// Name of the local override file, loaded on top of `.env`.
pub const OVERRIDE_ENV_FILE: &str = "api.env";

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 5432;

static SETTINGS: OnceCell<Settings> = OnceCell::new();

/// Load environment files from `dir`.
///
/// Order:
/// 1. `dir/.env`, never overriding variables that are already set in the
///    process environment
/// 2. `dir/api.env`, overriding anything loaded before it
///
/// Nothing is logged here: this runs before the CLI installs its
/// subscriber, so the caller logs [`EnvFiles::summary`] afterwards.
pub fn load_env_files(dir: &Path) -> Result<EnvFiles> {
    let mut loaded = Vec::new();

    let base_path = dir.join(".env");
    if base_path.exists() {
        dotenvy::from_path(&base_path)
            .map_err(|e| CoreError::env_file(&base_path, e.to_string()))?;
        loaded.push(base_path);
    }

    let override_path = dir.join(OVERRIDE_ENV_FILE);
    if override_path.exists() {
        dotenvy::from_path_override(&override_path)
            .map_err(|e| CoreError::env_file(&override_path, e.to_string()))?;
        loaded.push(override_path);
    }

    Ok(EnvFiles { loaded })
}

/// Env files picked up by [`load_env_files`], in load order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFiles {
    pub loaded: Vec<PathBuf>,
}

impl EnvFiles {
    /// One-line description for startup logs.
    pub fn summary(&self) -> String {
        if self.loaded.is_empty() {
            return "Using environment variables only (no env file found)".to_string();
        }
        let names: Vec<String> = self.loaded.iter().map(|p| p.display().to_string()).collect();
        format!("Loaded configuration from: {}", names.join(", "))
    }
}

/// Where the database URL came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseSource {
    /// `DATABASE_URL` was set
    Url,
    /// Assembled from the discrete `DATABASE_*` variables
    Parts {
        host: String,
        port: u16,
        user: String,
        name: String,
    },
}

/// Resolved database connection target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub url: String,
    pub source: DatabaseSource,
}

impl DatabaseSettings {
    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::resolve(|key| env::var(key).ok())
    }

    /// Resolve using `lookup` to read variables.
    ///
    /// Empty values count as unset.
    pub fn resolve<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("DATABASE_URL") {
            return Ok(Self {
                url,
                source: DatabaseSource::Url,
            });
        }

        let user = get("DATABASE_USER");
        let name = get("DATABASE_NAME");
        let (user, name) = match (user, name) {
            (Some(user), Some(name)) => (user, name),
            _ => {
                return Err(CoreError::config(
                    "database configuration is incomplete. Set DATABASE_URL or DATABASE_USER and \
                     DATABASE_NAME (and optional DATABASE_PASSWORD, DATABASE_HOST, DATABASE_PORT)",
                ))
            }
        };

        let password = get("DATABASE_PASSWORD").unwrap_or_default();
        let host = get("DATABASE_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get("DATABASE_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                CoreError::config(format!("DATABASE_PORT must be a port number, got '{}'", raw))
            })?,
            None => DEFAULT_PORT,
        };

        let url = format!(
            "postgresql://{}:{}@{}:{}/{}",
            urlencoding::encode(&user),
            urlencoding::encode(&password),
            host,
            port,
            name
        );

        Ok(Self {
            url,
            source: DatabaseSource::Parts {
                host,
                port,
                user,
                name,
            },
        })
    }

    /// The connection URL with any password replaced by `***`, for logs.
    pub fn redacted_url(&self) -> String {
        redact_password(&self.url)
    }
}

/// Query parameters libpq accepts a password through.
const PASSWORD_PARAMS: &[&str] = &["password"];

const REDACTED: &str = "***";

fn redact_password(raw: &str) -> String {
    let Ok(mut url) = Url::parse(raw) else {
        return "<unparseable URL>".to_string();
    };

    if url.password().is_some() && url.set_password(Some(REDACTED)).is_err() {
        return "<unparseable URL>".to_string();
    }

    let has_secret_param = url
        .query_pairs()
        .any(|(k, _)| PASSWORD_PARAMS.contains(&k.to_ascii_lowercase().as_str()));
    if has_secret_param {
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| {
                if PASSWORD_PARAMS.contains(&k.to_ascii_lowercase().as_str()) {
                    (k.into_owned(), REDACTED.to_string())
                } else {
                    (k.into_owned(), v.into_owned())
                }
            })
            .collect();
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }

    url.to_string()
}

/// Object store settings; absent when no bucket is configured
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectStoreSettings {
    pub bucket: String,
    pub region: Option<String>,
    pub endpoint: Option<String>,
}

impl ObjectStoreSettings {
    pub fn from_env() -> Option<Self> {
        Self::resolve(|key| env::var(key).ok())
    }

    pub fn resolve<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bucket = get("AWS_S3_BUCKET")?;
        Some(Self {
            bucket,
            region: get("AWS_REGION").or_else(|| get("AWS_DEFAULT_REGION")),
            endpoint: get("AWS_S3_ENDPOINT"),
        })
    }

    /// Public URL of an object stored under `key`.
    pub fn object_url(&self, key: &str) -> String {
        object_url(&self.bucket, key)
    }
}

/// `https://{bucket}.s3.amazonaws.com/{key}`
pub fn object_url(bucket: &str, key: &str) -> String {
    format!("https://{}.s3.amazonaws.com/{}", bucket, key)
}

/// Everything the server needs at startup
#[derive(Debug, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub object_store: Option<ObjectStoreSettings>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database: DatabaseSettings::from_env()?,
            object_store: ObjectStoreSettings::from_env(),
        })
    }
}

/// Process-wide settings, resolved on first use.
///
/// Call [`load_env_files`] before the first call so env files are honoured.
pub fn settings() -> Result<&'static Settings> {
    SETTINGS.get_or_try_init(Settings::from_env)
}
