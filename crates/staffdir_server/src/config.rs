//! Server configuration.
//!
//! Sources, later ones overriding earlier ones:
//! 1. built-in defaults
//! 2. `<config dir>/staffdir.toml` (optional; dir from `STAFFDIR_CONFIG_DIR`,
//!    default `config`)
//! 3. `STAFFDIR_` environment variables, e.g. `STAFFDIR_SERVER_PORT` ->
//!    `server.port`, `STAFFDIR_STORE_PATH` -> `store.path`

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

const CONFIG_FILE_STEM: &str = "staffdir";
const ENV_PREFIX: &str = "STAFFDIR";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Store file, created on first start.
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub level: String,
    /// Absolute directory for rolling log files; stderr when unset.
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub log: LogConfig,
}

impl AppConfig {
    /// Loads configuration from the directory named by `STAFFDIR_CONFIG_DIR`.
    pub fn load() -> Result<Self, ConfigError> {
        let config_dir =
            std::env::var("STAFFDIR_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
        Self::load_from(config_dir)
    }

    /// Loads configuration using `config_dir` for the optional file source.
    pub fn load_from(config_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = config_dir.as_ref().join(format!("{CONFIG_FILE_STEM}.toml"));

        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080_i64)?
            .set_default("store.path", "my.db")?
            .set_default("log.level", staffdir_core::default_log_level())?
            .add_source(File::from(file).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("_")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
