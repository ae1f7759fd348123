//! Global configuration types for the Playlist catalog.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls where
//! the REST API listens and where the catalog database lives.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.playlist/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

/// REST API listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Catalog database settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL. When unset the database lives at
    /// `{data_dir}/playlist.db`.
    #[serde(default)]
    pub url: Option<String>,
}
