//! Connection pools for the catalog database.
//!
//! SQLite serializes writers, so song inserts and deletes go through a single
//! writer connection while lookups share a read-only pool. WAL mode lets the
//! readers proceed while a write transaction is open.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

/// Catalog database handle: a read-only pool for lookups and a single
/// writer connection for inserts, updates and deletes.
#[derive(Clone)]
pub struct DatabasePool {
    pub reader: SqlitePool,
    pub writer: SqlitePool,
}

const READER_CONNECTIONS: u32 = 8;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

impl DatabasePool {
    /// Open the catalog database at `database_url` and bring its schema up to date.
    ///
    /// In-memory URLs are rejected: every reader connection would open its
    /// own empty database and never see the writer's tables.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = connect_options(database_url)?;

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options.clone())
            .await?;
        sqlx::migrate!("../../migrations").run(&writer).await?;

        // Readers open after migrations so they see the final schema.
        let reader = SqlitePoolOptions::new()
            .max_connections(READER_CONNECTIONS)
            .connect_with(options.read_only(true))
            .await?;

        tracing::debug!(database_url, "catalog database ready");
        Ok(Self { reader, writer })
    }
}

fn connect_options(database_url: &str) -> Result<SqliteConnectOptions, sqlx::Error> {
    if is_memory_url(database_url) {
        return Err(sqlx::Error::Configuration(
            format!("in-memory database '{database_url}' is not supported, use a file URL").into(),
        ));
    }

    Ok(SqliteConnectOptions::from_str(database_url)?
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT)
        .create_if_missing(true))
}

fn is_memory_url(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Build the SQLite URL for the catalog database inside `data_dir`.
pub fn database_url_in(data_dir: &Path) -> String {
    format!("sqlite://{}?mode=rwc", data_dir.join("playlist.db").display())
}
