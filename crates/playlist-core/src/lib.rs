//! Business logic and repository trait definitions for the Playlist catalog.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements. It depends only on `playlist-types` -- never on
//! `playlist-infra` or any database/IO crate.

pub mod repository;
pub mod service;
