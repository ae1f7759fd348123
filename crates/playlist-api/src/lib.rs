//! Application layer of the Playlist catalog: the `playlist` CLI and the
//! axum REST API, both driving the same [`state::AppState`].

pub mod cli;
pub mod http;
pub mod state;
