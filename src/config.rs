//! Configuration loading
//!
//! Layers, lowest priority first: built-in defaults, an optional TOML file,
//! then `BETFEED__SECTION__KEY` environment variables (a `.env` file is read
//! into the environment beforehand).

use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file path, `~` is expanded. `:memory:` keeps everything in RAM.
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl DatabaseConfig {
    /// Connection URL understood by sqlx
    pub fn url(&self) -> String {
        if self.path == ":memory:" {
            return "sqlite::memory:".to_string();
        }
        let expanded = shellexpand::tilde(&self.path);
        format!("sqlite://{}?mode=rwc", expanded)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Rows returned by the list endpoints
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            list_limit: default_list_limit(),
        }
    }
}

fn default_db_path() -> String {
    "betfeed.db".to_string()
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_list_limit() -> usize {
    100
}

impl Config {
    /// Load configuration from `path` (may be absent) and the environment
    pub fn load(path: &str) -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();
        let settings = config::Config::builder()
            .set_default("database.path", defaults.database.path)?
            .set_default("server.bind_addr", defaults.server.bind_addr)?
            .set_default("feed.list_limit", defaults.feed.list_limit as u64)?
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("BETFEED")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        tracing::debug!(
            "Loaded config: db={} bind={} list_limit={}",
            config.database.path,
            config.server.bind_addr,
            config.feed.list_limit
        );
        Ok(config)
    }
}
