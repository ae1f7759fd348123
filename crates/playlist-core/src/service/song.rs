//! Song catalog service.
//!
//! The only place where catalog rules live: classification lookups, melody
//! checks on creation, and the conversion of store absence into typed
//! not-found errors. Every operation is a single request against the
//! repository (or one read followed by one write for update and delete).

use playlist_types::classification::{Classification, MelodyType, SongCategory};
use playlist_types::error::{CatalogError, RepositoryError};
use playlist_types::song::{MelodyId, Song, SongId, is_blank};

use crate::repository::song::SongRepository;

/// Service orchestrating catalog lookups and the song lifecycle.
///
/// Generic over the repository trait to maintain clean architecture --
/// playlist-core never depends on playlist-infra.
pub struct SongService<R: SongRepository> {
    song_repo: R,
}

impl<R: SongRepository> SongService<R> {
    pub fn new(song_repo: R) -> Self {
        Self { song_repo }
    }

    /// Every song in the catalog (possibly none).
    pub async fn list_all(&self) -> Result<Vec<Song>, CatalogError> {
        tracing::debug!("listing all songs");
        self.song_repo.find_all().await.map_err(storage_error)
    }

    /// Songs of a category given as free text (case-insensitive).
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Song>, CatalogError> {
        let resolved = SongCategory::resolve(category)
            .ok_or_else(|| CatalogError::CategoryNotFound(category.to_string()))?;

        tracing::debug!(category = %resolved, "listing songs by category");
        self.song_repo
            .find_by_category(resolved)
            .await
            .map_err(storage_error)
    }

    /// Songs by artist name, matched as given.
    pub async fn list_by_artist(&self, artist_name: &str) -> Result<Vec<Song>, CatalogError> {
        tracing::debug!(artist_name, "listing songs by artist");
        self.song_repo
            .find_by_artist_name(artist_name)
            .await
            .map_err(storage_error)
    }

    /// The song owning the melody with the given id.
    pub async fn get_by_melody_id(&self, melody_id: MelodyId) -> Result<Song, CatalogError> {
        self.song_repo
            .find_by_melody_id(melody_id)
            .await
            .map_err(storage_error)?
            .ok_or(CatalogError::SongNotFoundForMelody(melody_id))
    }

    /// Songs whose melody type, given as free text, matches (case-insensitive).
    pub async fn list_by_melody_type(&self, melody_type: &str) -> Result<Vec<Song>, CatalogError> {
        let resolved = MelodyType::resolve(melody_type)
            .ok_or_else(|| CatalogError::MelodyTypeNotFound(melody_type.to_string()))?;

        tracing::debug!(melody_type = %resolved, "listing songs by melody type");
        self.song_repo
            .find_by_melody_type(resolved)
            .await
            .map_err(storage_error)
    }

    /// Get a song by id.
    pub async fn get_by_id(&self, id: SongId) -> Result<Song, CatalogError> {
        self.song_repo
            .find_by_id(id)
            .await
            .map_err(storage_error)?
            .ok_or(CatalogError::SongNotFound(id))
    }

    /// Create a song together with its melody.
    ///
    /// The melody is checked before anything is written, in this order:
    /// pitch not blank, duration not blank, type present. Ids on the input
    /// are ignored; the store assigns fresh ones.
    pub async fn create(&self, mut song: Song) -> Result<Song, CatalogError> {
        if is_blank(&song.melody.pitch) {
            return Err(CatalogError::InvalidFormat(
                "Melody : pitch must not be null or blank".to_string(),
            ));
        }
        if is_blank(&song.melody.duration) {
            return Err(CatalogError::InvalidFormat(
                "Melody : duration must not be null or blank".to_string(),
            ));
        }
        if song.melody.melody_type.is_none() {
            return Err(CatalogError::InvalidFormat(
                "Melody : type must not be null".to_string(),
            ));
        }

        song.id = None;
        song.melody.id = None;

        let created = self.song_repo.save(&song).await.map_err(storage_error)?;
        tracing::info!(
            song_id = ?created.id,
            melody_id = ?created.melody.id,
            title = %created.title,
            "song created"
        );
        Ok(created)
    }

    /// Overwrite the scalar fields of an existing song.
    ///
    /// Title, description, artist name, category and duration are taken from
    /// the input. The stored melody is never modified, whatever the input's
    /// melody holds.
    pub async fn update(&self, song: Song) -> Result<Song, CatalogError> {
        let id = song
            .id
            .ok_or_else(|| CatalogError::InvalidFormat("Song : id must not be null".to_string()))?;

        let mut stored = self.get_by_id(id).await?;
        stored.copy_scalars_from(&song);

        let updated = self.song_repo.save(&stored).await.map_err(|e| match e {
            RepositoryError::NotFound => CatalogError::SongNotFound(id),
            other => storage_error(other),
        })?;
        tracing::info!(song_id = %id, "song updated");
        Ok(updated)
    }

    /// Delete a song and its melody.
    pub async fn delete_by_id(&self, id: SongId) -> Result<(), CatalogError> {
        self.get_by_id(id).await?;

        self.song_repo.delete_by_id(id).await.map_err(|e| match e {
            RepositoryError::NotFound => CatalogError::SongNotFound(id),
            other => storage_error(other),
        })?;
        tracing::info!(song_id = %id, "song deleted");
        Ok(())
    }
}

fn storage_error(e: RepositoryError) -> CatalogError {
    CatalogError::StorageError(e.to_string())
}
