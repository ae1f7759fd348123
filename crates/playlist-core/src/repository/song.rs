//! Song repository trait definition.

use playlist_types::classification::{MelodyType, SongCategory};
use playlist_types::error::RepositoryError;
use playlist_types::song::{MelodyId, Song, SongId};

/// Repository trait for song persistence.
///
/// A song and its melody are stored and removed as one unit. Absence is
/// reported as `None` or an empty list, never as an error. List results are
/// ordered by song id.
///
/// Implementations live in playlist-infra (e.g., SqliteSongRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait SongRepository: Send + Sync {
    /// Persist a song.
    ///
    /// Without an id, inserts the song together with its melody and returns
    /// it with both ids assigned. With an id, overwrites the stored song's
    /// scalar fields; the stored melody is left as is.
    fn save(
        &self,
        song: &Song,
    ) -> impl std::future::Future<Output = Result<Song, RepositoryError>> + Send;

    /// Get a song by its id.
    fn find_by_id(
        &self,
        id: SongId,
    ) -> impl std::future::Future<Output = Result<Option<Song>, RepositoryError>> + Send;

    /// Every stored song.
    fn find_all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Song>, RepositoryError>> + Send;

    /// Songs of the given category.
    fn find_by_category(
        &self,
        category: SongCategory,
    ) -> impl std::future::Future<Output = Result<Vec<Song>, RepositoryError>> + Send;

    /// Songs whose artist name matches exactly.
    fn find_by_artist_name(
        &self,
        artist_name: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Song>, RepositoryError>> + Send;

    /// The song owning the melody with the given id.
    fn find_by_melody_id(
        &self,
        melody_id: MelodyId,
    ) -> impl std::future::Future<Output = Result<Option<Song>, RepositoryError>> + Send;

    /// Songs whose melody has the given type.
    fn find_by_melody_type(
        &self,
        melody_type: MelodyType,
    ) -> impl std::future::Future<Output = Result<Vec<Song>, RepositoryError>> + Send;

    /// Delete a song and its melody.
    fn delete_by_id(
        &self,
        id: SongId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
