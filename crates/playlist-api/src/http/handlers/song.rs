//! Song catalog handlers for the REST API.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use playlist_types::song::{MelodyId, Song, SongId};

use crate::http::error::AppError;
use crate::http::extractors::{ApiJson, ApiPath};
use crate::state::AppState;

/// 200 with the list, or 204 when it is empty.
fn list_response(songs: Vec<Song>) -> Response {
    if songs.is_empty() {
        StatusCode::NO_CONTENT.into_response()
    } else {
        Json(songs).into_response()
    }
}

/// Reject the payload when any boundary field constraint fails.
fn check_fields(song: &Song) -> Result<(), AppError> {
    let violations = song.validate();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(violations))
    }
}

/// GET /api/songs - List every song.
pub async fn list_songs(State(state): State<AppState>) -> Result<Response, AppError> {
    let songs = state.song_service.list_all().await?;
    Ok(list_response(songs))
}

/// GET /api/songs/category/{category} - List songs of a category.
pub async fn list_by_category(
    State(state): State<AppState>,
    ApiPath(category): ApiPath<String>,
) -> Result<Response, AppError> {
    let songs = state.song_service.list_by_category(&category).await?;
    Ok(list_response(songs))
}

/// GET /api/songs/artist/{artistName} - List songs of an artist.
pub async fn list_by_artist(
    State(state): State<AppState>,
    ApiPath(artist_name): ApiPath<String>,
) -> Result<Response, AppError> {
    let songs = state.song_service.list_by_artist(&artist_name).await?;
    Ok(list_response(songs))
}

/// GET /api/songs/melody/id/{id} - The song owning a melody.
pub async fn get_by_melody_id(
    State(state): State<AppState>,
    ApiPath(melody_id): ApiPath<MelodyId>,
) -> Result<Json<Song>, AppError> {
    let song = state.song_service.get_by_melody_id(melody_id).await?;
    Ok(Json(song))
}

/// GET /api/songs/melody/type/{type} - List songs whose melody has a type.
pub async fn list_by_melody_type(
    State(state): State<AppState>,
    ApiPath(melody_type): ApiPath<String>,
) -> Result<Response, AppError> {
    let songs = state.song_service.list_by_melody_type(&melody_type).await?;
    Ok(list_response(songs))
}

/// GET /api/songs/{id} - Get a song by id.
pub async fn get_song(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<SongId>,
) -> Result<Json<Song>, AppError> {
    let song = state.song_service.get_by_id(id).await?;
    Ok(Json(song))
}

/// POST /api/songs - Create a song with its melody.
pub async fn create_song(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Song>,
) -> Result<(StatusCode, Json<Song>), AppError> {
    check_fields(&body)?;
    let song = state.song_service.create(body).await?;
    Ok((StatusCode::CREATED, Json(song)))
}

/// PUT /api/songs - Update the scalar fields of an existing song.
pub async fn update_song(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Song>,
) -> Result<Json<Song>, AppError> {
    check_fields(&body)?;
    let song = state.song_service.update(body).await?;
    Ok(Json(song))
}

/// DELETE /api/songs/{id} - Delete a song and its melody.
pub async fn delete_song(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<SongId>,
) -> Result<StatusCode, AppError> {
    state.song_service.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
