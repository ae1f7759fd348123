//! Shared domain types for the Playlist catalog.
//!
//! This crate contains the domain types used across the workspace: Song and
//! its owned Melody, the closed classification enums, global configuration,
//! and the catalog error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod classification;
pub mod config;
pub mod error;
pub mod song;
