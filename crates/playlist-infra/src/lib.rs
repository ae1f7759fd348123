//! Infrastructure layer for the Playlist catalog.
//!
//! Contains implementations of the repository traits defined in `playlist-core`
//! (SQLite storage) and the global configuration loader.

pub mod config;
pub mod sqlite;
