//! HTTP/REST API layer for the Playlist catalog.
//!
//! Axum-based REST API rooted at `/api/songs` with a uniform JSON error body
//! and permissive CORS.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
