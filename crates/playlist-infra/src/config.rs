//! Global configuration loader for the Playlist catalog.
//!
//! Reads `config.toml` from the data directory (`~/.playlist/` in production)
//! and deserializes it into [`GlobalConfig`]. Falls back to sensible defaults
//! when the file is missing or malformed.

use std::path::{Path, PathBuf};

use playlist_types::config::GlobalConfig;

use crate::sqlite::pool::database_url_in;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "PLAYLIST_DATA_DIR";

/// Resolve the data directory.
///
/// `PLAYLIST_DATA_DIR` wins; otherwise `~/.playlist`, or `./.playlist` when no
/// home directory is known.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".playlist");
    }

    PathBuf::from(".playlist")
}

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// The database URL to connect to: the configured one, or the default file
/// inside `data_dir`. Configured URLs must point at a file; in-memory
/// databases are refused by the pool.
pub fn resolve_database_url(config: &GlobalConfig, data_dir: &Path) -> String {
    config
        .database
        .url
        .clone()
        .unwrap_or_else(|| database_url_in(data_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_global_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_global_config(tmp.path()).await;
        assert_eq!(config, GlobalConfig::default());
    }

    #[tokio::test]
    async fn load_global_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
[server]
host = "0.0.0.0"
port = 9090

[database]
url = "sqlite:///var/lib/playlist/catalog.db?mode=rwc"
"#,
        )
        .await
        .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        assert_eq!(
            config.database.url.as_deref(),
            Some("sqlite:///var/lib/playlist/catalog.db?mode=rwc")
        );
    }

    #[tokio::test]
    async fn load_global_config_malformed_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "[server\nport = ")
            .await
            .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config, GlobalConfig::default());
    }

    #[test]
    fn resolve_database_url_prefers_config() {
        let mut config = GlobalConfig::default();
        let data_dir = Path::new("/tmp/playlist-data");
        assert_eq!(
            resolve_database_url(&config, data_dir),
            "sqlite:///tmp/playlist-data/playlist.db?mode=rwc"
        );

        config.database.url = Some("sqlite:///elsewhere.db".to_string());
        assert_eq!(resolve_database_url(&config, data_dir), "sqlite:///elsewhere.db");
    }

    #[test]
    fn resolve_data_dir_from_env() {
        // SAFETY: This test is single-threaded and restores the env var immediately.
        unsafe {
            std::env::set_var(DATA_DIR_ENV, "/tmp/test-playlist");
        }
        let dir = resolve_data_dir();
        assert_eq!(dir, PathBuf::from("/tmp/test-playlist"));
        unsafe {
            std::env::remove_var(DATA_DIR_ENV);
        }
    }
}
