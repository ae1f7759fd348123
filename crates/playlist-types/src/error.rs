use thiserror::Error;

use crate::song::{MelodyId, SongId};

/// Errors returned by the catalog service.
///
/// The messages of the not-found and invalid-format variants are stable:
/// the REST boundary returns them verbatim to callers.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Not found Category with value = {0}")]
    CategoryNotFound(String),

    #[error("Not found type Melody with value = {0}")]
    MelodyTypeNotFound(String),

    #[error("Not found song with id = {0}")]
    SongNotFound(SongId),

    #[error("Not found song with melody id = {0}")]
    SongNotFoundForMelody(MelodyId),

    #[error("{0}")]
    InvalidFormat(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

impl CatalogError {
    /// True for every "lookup found nothing" variant.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::CategoryNotFound(_)
                | CatalogError::MelodyTypeNotFound(_)
                | CatalogError::SongNotFound(_)
                | CatalogError::SongNotFoundForMelody(_)
        )
    }
}

/// Errors from repository operations (used by trait definitions in playlist-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_messages() {
        assert_eq!(
            CatalogError::CategoryNotFound("popy".to_string()).to_string(),
            "Not found Category with value = popy"
        );
        assert_eq!(
            CatalogError::MelodyTypeNotFound("DIRECTyyy".to_string()).to_string(),
            "Not found type Melody with value = DIRECTyyy"
        );
        assert_eq!(
            CatalogError::SongNotFound(SongId(4000)).to_string(),
            "Not found song with id = 4000"
        );
        assert_eq!(
            CatalogError::SongNotFoundForMelody(MelodyId(2000)).to_string(),
            "Not found song with melody id = 2000"
        );
    }

    #[test]
    fn test_is_not_found() {
        assert!(CatalogError::SongNotFound(SongId(1)).is_not_found());
        assert!(CatalogError::CategoryNotFound("x".to_string()).is_not_found());
        assert!(!CatalogError::InvalidFormat("Melody : type must not be null".to_string()).is_not_found());
        assert!(!CatalogError::StorageError("disk full".to_string()).is_not_found());
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
        assert_eq!(RepositoryError::Connection.to_string(), "database connection error");
    }
}
