use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use sea_orm::Database;
use serde::Deserialize;
use tracing::{debug, info};

use crate::schemas::AppState;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Settings needed to run the web server.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Connection string; there is no default
    pub database_url: String,
    pub bind_address: String,
    pub request_timeout_secs: u64,
}

/// Where [`ServerConfig::load`] reads from, lowest precedence first:
/// built-in defaults, the optional file, the process environment, then the
/// explicit overrides.
#[derive(Debug, Default)]
pub struct ConfigSources {
    pub file: Option<PathBuf>,
    pub read_env: bool,
    pub database_url: Option<String>,
    pub bind_address: Option<String>,
}

impl ServerConfig {
    pub fn load(sources: ConfigSources) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS)?;

        if let Some(path) = sources.file {
            debug!("Reading configuration file {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }
        if sources.read_env {
            builder = builder.add_source(Environment::default());
        }

        let config = builder
            .set_override_option("database_url", sources.database_url)?
            .set_override_option("bind_address", sources.bind_address)?
            .build()?;

        config
            .try_deserialize::<ServerConfig>()
            .context("Invalid server configuration (is DATABASE_URL set?)")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Opens the database connection the handlers share.
///
/// A database that cannot be reached is an error; the caller exits.
pub async fn initialize_app_state(config: &ServerConfig) -> Result<AppState> {
    info!("Connecting to database");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to the database")?;
    debug!("Database connection established");

    Ok(AppState { db })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_apply_under_overrides() {
        let config = ServerConfig::load(ConfigSources {
            database_url: Some("sqlite::memory:".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_missing_database_url_is_an_error() {
        let result = ServerConfig::load(ConfigSources::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_file_values_yield_to_overrides() {
        let path = std::env::temp_dir().join(format!("intake-config-{}.toml", std::process::id()));
        fs::write(
            &path,
            "database_url = \"sqlite://from-file.db\"\nbind_address = \"127.0.0.1:9000\"\nrequest_timeout_secs = 5\n",
        )
        .unwrap();

        let config = ServerConfig::load(ConfigSources {
            file: Some(path.clone()),
            bind_address: Some("127.0.0.1:8080".to_string()),
            ..Default::default()
        })
        .unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.database_url, "sqlite://from-file.db");
        assert_eq!(config.bind_address, "127.0.0.1:8080");
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[tokio::test]
    async fn test_initialize_app_state_connects() {
        let config = ServerConfig::load(ConfigSources {
            database_url: Some("sqlite::memory:".to_string()),
            ..Default::default()
        })
        .unwrap();

        let state = initialize_app_state(&config).await.unwrap();
        assert!(state.db.ping().await.is_ok());
    }
}
