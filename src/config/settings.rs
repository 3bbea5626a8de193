//! Application settings loaded from `config.toml` and the environment.
//!
//! The TOML file is optional. Values it does not set fall back to defaults,
//! and `DATABASE_URL` / `BIND_ADDR` in the environment override both.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_VAR: &str = "ELEVATORS_CONFIG";
/// Config file read when [`CONFIG_PATH_VAR`] is unset
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_DATABASE_URL: &str = "sqlite://elevators.db?mode=rwc";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage settings
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// `[server]` table
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Socket address the API listens on
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// `[database]` table
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// SeaORM connection URL, e.g. `sqlite://elevators.db?mode=rwc`
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

/// Parses a configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config: {e}"),
    })
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading configuration from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_config(&contents)
}

impl AppConfig {
    /// Applies `DATABASE_URL` and `BIND_ADDR` on top of the loaded values.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var("DATABASE_URL").ok(),
            std::env::var("BIND_ADDR").ok(),
        )
    }

    fn with_overrides(mut self, database_url: Option<String>, bind_addr: Option<String>) -> Self {
        if let Some(url) = database_url.filter(|u| !u.trim().is_empty()) {
            self.database.url = url;
        }
        if let Some(addr) = bind_addr.filter(|a| !a.trim().is_empty()) {
            self.server.bind_addr = addr;
        }
        self
    }
}

/// Loads the application configuration.
///
/// Reads the file named by `ELEVATORS_CONFIG` (default `config.toml`) when it
/// exists, otherwise starts from defaults, then applies environment overrides.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = if Path::new(&path).exists() {
        let config = load_config(&path)?;
        tracing::info!("Loaded configuration from {path}");
        config
    } else {
        tracing::info!("No configuration file at {path}, using defaults");
        AppConfig::default()
    };
    Ok(config.with_env_overrides())
}
