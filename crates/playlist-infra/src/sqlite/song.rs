//! SQLite song repository implementation.
//!
//! Implements `SongRepository` from `playlist-core` using sqlx with split read/write pools.
//! A song row references exactly one melody row; both are inserted and deleted
//! inside a single transaction so a melody never outlives its song.

use chrono::Utc;
use playlist_core::repository::song::SongRepository;
use playlist_types::classification::{MelodyType, SongCategory};
use playlist_types::error::RepositoryError;
use playlist_types::song::{Melody, MelodyId, Song, SongId};
use sqlx::Row;

use super::pool::DatabasePool;

const SELECT_SONGS: &str = "SELECT s.id, s.title, s.description, s.artist_name, s.duration, s.category,
            m.id AS melody_id, m.pitch, m.duration AS melody_duration, m.type AS melody_type
     FROM songs s
     JOIN melodies m ON m.id = s.melody_id";

/// SQLite-backed implementation of `SongRepository`.
pub struct SqliteSongRepository {
    pool: DatabasePool,
}

impl SqliteSongRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    async fn insert(&self, song: &Song) -> Result<Song, RepositoryError> {
        let melody_type = song
            .melody
            .melody_type
            .ok_or_else(|| RepositoryError::Query("melody type is required".to_string()))?;
        let now = Utc::now().to_rfc3339();

        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(query_error)?;

        let melody_id = sqlx::query(
            "INSERT INTO melodies (pitch, duration, type, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&song.melody.pitch)
        .bind(&song.melody.duration)
        .bind(melody_type.to_string())
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(query_error)?
        .last_insert_rowid();

        let song_id = sqlx::query(
            "INSERT INTO songs (title, description, artist_name, duration, category, melody_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&song.title)
        .bind(&song.description)
        .bind(&song.artist_name)
        .bind(&song.duration)
        .bind(song.category.to_string())
        .bind(melody_id)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(query_error)?
        .last_insert_rowid();

        tx.commit()
            .await
            .map_err(query_error)?;

        tracing::debug!(song_id, melody_id, "inserted song with melody");

        let mut stored = song.clone();
        stored.id = Some(SongId(song_id));
        stored.melody.id = Some(MelodyId(melody_id));
        stored.melody.melody_type = Some(melody_type);
        Ok(stored)
    }

    async fn update_scalars(&self, id: SongId, song: &Song) -> Result<Song, RepositoryError> {
        let result = sqlx::query(
            "UPDATE songs SET title = ?, description = ?, artist_name = ?, duration = ?, category = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&song.title)
        .bind(&song.description)
        .bind(&song.artist_name)
        .bind(&song.duration)
        .bind(song.category.to_string())
        .bind(Utc::now().to_rfc3339())
        .bind(id.0)
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.fetch_one(&format!("{SELECT_SONGS} WHERE s.id = ?"), id.0)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn fetch_one(&self, sql: &str, key: i64) -> Result<Option<Song>, RepositoryError> {
        let row = sqlx::query(sql)
            .bind(key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        match row {
            Some(row) => {
                let song_row = SongRow::from_row(&row).map_err(query_error)?;
                Ok(Some(song_row.into_song()?))
            }
            None => Ok(None),
        }
    }

    async fn fetch_many(&self, sql: &str, key: Option<String>) -> Result<Vec<Song>, RepositoryError> {
        let mut query = sqlx::query(sql);
        if let Some(key) = key {
            query = query.bind(key);
        }

        let rows = query
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        let mut songs = Vec::with_capacity(rows.len());
        for row in &rows {
            let song_row = SongRow::from_row(row).map_err(query_error)?;
            songs.push(song_row.into_song()?);
        }

        Ok(songs)
    }
}

/// Pool-level failures mean the database is unreachable; everything else is
/// reported as a failed query.
fn query_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
            RepositoryError::Connection
        }
        other => RepositoryError::Query(other.to_string()),
    }
}

/// Internal row type for mapping a joined song/melody row to the domain Song.
struct SongRow {
    id: i64,
    title: String,
    description: String,
    artist_name: String,
    duration: String,
    category: String,
    melody_id: i64,
    pitch: String,
    melody_duration: String,
    melody_type: String,
}

impl SongRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            artist_name: row.try_get("artist_name")?,
            duration: row.try_get("duration")?,
            category: row.try_get("category")?,
            melody_id: row.try_get("melody_id")?,
            pitch: row.try_get("pitch")?,
            melody_duration: row.try_get("melody_duration")?,
            melody_type: row.try_get("melody_type")?,
        })
    }

    fn into_song(self) -> Result<Song, RepositoryError> {
        let category: SongCategory = self
            .category
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        let melody_type: MelodyType = self
            .melody_type
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        Ok(Song {
            id: Some(SongId(self.id)),
            title: self.title,
            description: self.description,
            artist_name: self.artist_name,
            duration: self.duration,
            category,
            melody: Melody {
                id: Some(MelodyId(self.melody_id)),
                pitch: self.pitch,
                duration: self.melody_duration,
                melody_type: Some(melody_type),
            },
        })
    }
}

impl SongRepository for SqliteSongRepository {
    async fn save(&self, song: &Song) -> Result<Song, RepositoryError> {
        match song.id {
            None => self.insert(song).await,
            Some(id) => self.update_scalars(id, song).await,
        }
    }

    async fn find_by_id(&self, id: SongId) -> Result<Option<Song>, RepositoryError> {
        self.fetch_one(&format!("{SELECT_SONGS} WHERE s.id = ?"), id.0)
            .await
    }

    async fn find_all(&self) -> Result<Vec<Song>, RepositoryError> {
        self.fetch_many(&format!("{SELECT_SONGS} ORDER BY s.id"), None)
            .await
    }

    async fn find_by_category(&self, category: SongCategory) -> Result<Vec<Song>, RepositoryError> {
        self.fetch_many(
            &format!("{SELECT_SONGS} WHERE s.category = ? ORDER BY s.id"),
            Some(category.to_string()),
        )
        .await
    }

    async fn find_by_artist_name(&self, artist_name: &str) -> Result<Vec<Song>, RepositoryError> {
        self.fetch_many(
            &format!("{SELECT_SONGS} WHERE s.artist_name = ? ORDER BY s.id"),
            Some(artist_name.to_string()),
        )
        .await
    }

    async fn find_by_melody_id(&self, melody_id: MelodyId) -> Result<Option<Song>, RepositoryError> {
        self.fetch_one(&format!("{SELECT_SONGS} WHERE m.id = ?"), melody_id.0)
            .await
    }

    async fn find_by_melody_type(
        &self,
        melody_type: MelodyType,
    ) -> Result<Vec<Song>, RepositoryError> {
        self.fetch_many(
            &format!("{SELECT_SONGS} WHERE m.type = ? ORDER BY s.id"),
            Some(melody_type.to_string()),
        )
        .await
    }

    async fn delete_by_id(&self, id: SongId) -> Result<(), RepositoryError> {
        // Use a transaction: DELETE song + DELETE its melody
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(query_error)?;

        let melody_id: Option<(i64,)> = sqlx::query_as("SELECT melody_id FROM songs WHERE id = ?")
            .bind(id.0)
            .fetch_optional(&mut *tx)
            .await
            .map_err(query_error)?;

        let Some((melody_id,)) = melody_id else {
            return Err(RepositoryError::NotFound);
        };

        sqlx::query("DELETE FROM songs WHERE id = ?")
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;

        sqlx::query("DELETE FROM melodies WHERE id = ?")
            .bind(melody_id)
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;

        tx.commit()
            .await
            .map_err(query_error)?;

        tracing::debug!(song_id = id.0, melody_id, "deleted song with melody");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::{DatabasePool, database_url_in};

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let url = database_url_in(dir.path());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_song(title: &str, category: SongCategory, melody_type: MelodyType) -> Song {
        Song::new(
            title,
            "Live At Abbey Road Studios",
            "Sam Smith",
            "3:01",
            category,
            Melody::new("Melody Pitch", "03:56", melody_type),
        )
    }

    async fn count(pool: &DatabasePool, table: &str) -> i64 {
        let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool.reader)
            .await
            .unwrap();
        n
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_and_roundtrips() {
        let pool = test_pool().await;
        let repo = SqliteSongRepository::new(pool);
        let song = make_song("For The Lover That I Lost", SongCategory::Pop, MelodyType::Color);

        let created = repo.save(&song).await.unwrap();
        assert!(created.id.is_some());
        assert!(created.melody.id.is_some());

        let found = repo.find_by_id(created.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(found.melody.pitch, "Melody Pitch");
        assert_eq!(found.melody.melody_type, Some(MelodyType::Color));
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let pool = test_pool().await;
        let repo = SqliteSongRepository::new(pool);

        assert!(repo.find_by_id(SongId(4000)).await.unwrap().is_none());
        assert!(repo.find_by_melody_id(MelodyId(4000)).await.unwrap().is_none());
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_filters() {
        let pool = test_pool().await;
        let repo = SqliteSongRepository::new(pool);

        let pop = repo
            .save(&make_song("Alpha", SongCategory::Pop, MelodyType::Color))
            .await
            .unwrap();
        let classical = repo
            .save(&make_song("Beta", SongCategory::Classical, MelodyType::Blends))
            .await
            .unwrap();
        let mut other_artist = make_song("Gamma", SongCategory::Pop, MelodyType::Blends);
        other_artist.artist_name = "Adele".to_string();
        let other_artist = repo.save(&other_artist).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all, vec![pop.clone(), classical.clone(), other_artist.clone()]);

        let pops = repo.find_by_category(SongCategory::Pop).await.unwrap();
        assert_eq!(pops, vec![pop.clone(), other_artist.clone()]);

        let blends = repo.find_by_melody_type(MelodyType::Blends).await.unwrap();
        assert_eq!(blends, vec![classical.clone(), other_artist.clone()]);

        let directions = repo.find_by_melody_type(MelodyType::Direction).await.unwrap();
        assert!(directions.is_empty());

        let adele = repo.find_by_artist_name("Adele").await.unwrap();
        assert_eq!(adele, vec![other_artist]);

        let owner = repo
            .find_by_melody_id(classical.melody.id.unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(owner, classical);
    }

    #[tokio::test]
    async fn test_update_changes_scalars_only() {
        let pool = test_pool().await;
        let repo = SqliteSongRepository::new(pool);
        let created = repo
            .save(&make_song("Updatable", SongCategory::Pop, MelodyType::Color))
            .await
            .unwrap();

        let mut changed = created.clone();
        changed.title = "Updated".to_string();
        changed.category = SongCategory::Jazz;
        changed.melody.pitch = "Ignored".to_string();
        changed.melody.melody_type = Some(MelodyType::Direction);

        let updated = repo.save(&changed).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Updated");
        assert_eq!(updated.category, SongCategory::Jazz);
        assert_eq!(updated.melody, created.melody);

        let (created_at, updated_at): (String, String) =
            sqlx::query_as("SELECT created_at, updated_at FROM songs WHERE id = ?")
                .bind(created.id.unwrap().0)
                .fetch_one(&repo.pool.reader)
                .await
                .unwrap();
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at).unwrap();
        let updated_at = chrono::DateTime::parse_from_rfc3339(&updated_at).unwrap();
        assert!(updated_at > created_at, "updated_at should advance on update");
    }

    #[tokio::test]
    async fn test_closed_pool_is_connection_error() {
        let pool = test_pool().await;
        let repo = SqliteSongRepository::new(pool.clone());
        pool.reader.close().await;
        pool.writer.close().await;

        let err = repo.find_all().await.unwrap_err();
        assert!(matches!(err, RepositoryError::Connection));
    }

    #[tokio::test]
    async fn test_update_nonexistent() {
        let pool = test_pool().await;
        let repo = SqliteSongRepository::new(pool);

        let mut ghost = make_song("Ghost", SongCategory::Pop, MelodyType::Color);
        ghost.id = Some(SongId(4000));
        let err = repo.save(&ghost).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_removes_melody_too() {
        let pool = test_pool().await;
        let repo = SqliteSongRepository::new(pool.clone());
        let created = repo
            .save(&make_song("Deletable", SongCategory::Pop, MelodyType::Color))
            .await
            .unwrap();
        let kept = repo
            .save(&make_song("Kept", SongCategory::Rock, MelodyType::Blends))
            .await
            .unwrap();

        repo.delete_by_id(created.id.unwrap()).await.unwrap();

        assert!(repo.find_by_id(created.id.unwrap()).await.unwrap().is_none());
        assert!(
            repo.find_by_melody_id(created.melody.id.unwrap())
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(count(&pool, "songs").await, 1);
        assert_eq!(count(&pool, "melodies").await, 1);
        assert_eq!(repo.find_all().await.unwrap(), vec![kept]);
    }

    #[tokio::test]
    async fn test_delete_nonexistent() {
        let pool = test_pool().await;
        let repo = SqliteSongRepository::new(pool);

        let err = repo.delete_by_id(SongId(4000)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_insert_without_melody_type_writes_nothing() {
        let pool = test_pool().await;
        let repo = SqliteSongRepository::new(pool.clone());
        let mut song = make_song("Typeless", SongCategory::Pop, MelodyType::Color);
        song.melody.melody_type = None;

        assert!(repo.save(&song).await.is_err());
        assert_eq!(count(&pool, "melodies").await, 0);
        assert_eq!(count(&pool, "songs").await, 0);
    }
}
