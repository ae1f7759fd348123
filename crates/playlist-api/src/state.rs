//! Application state wiring the catalog service to its SQLite store.
//!
//! AppState holds the concrete service instance used by both CLI and REST API.
//! `SongService` is generic over the repository trait; AppState pins it to the
//! SQLite implementation.

use std::path::PathBuf;
use std::sync::Arc;

use playlist_core::service::song::SongService;
use playlist_infra::config::{load_global_config, resolve_data_dir, resolve_database_url};
use playlist_infra::sqlite::pool::DatabasePool;
use playlist_infra::sqlite::song::SqliteSongRepository;
use playlist_types::config::GlobalConfig;

/// Catalog service pinned to the SQLite store.
pub type ConcreteSongService = SongService<SqliteSongRepository>;

/// Shared application state.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub song_service: Arc<ConcreteSongService>,
    pub data_dir: PathBuf,
    pub config: GlobalConfig,
}

impl AppState {
    /// Initialize the application state: load config, connect to DB, wire the service.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_global_config(&data_dir).await;
        let db_url = resolve_database_url(&config, &data_dir);
        let db_pool = DatabasePool::new(&db_url).await?;

        tracing::debug!(data_dir = %data_dir.display(), "application state ready");
        Ok(Self::from_pool(db_pool, data_dir, config))
    }

    /// Wire the state around an already opened pool.
    pub fn from_pool(db_pool: DatabasePool, data_dir: PathBuf, config: GlobalConfig) -> Self {
        let song_service = SongService::new(SqliteSongRepository::new(db_pool));

        Self {
            song_service: Arc::new(song_service),
            data_dir,
            config,
        }
    }
}
