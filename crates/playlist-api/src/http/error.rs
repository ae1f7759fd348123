//! Application error type mapping to HTTP status codes and the error body.
//!
//! Every error response has the shape `{status, message, timestamp}`; field
//! validation failures additionally carry `fieldErrors: [{field, message}]`.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use playlist_types::error::CatalogError;
use playlist_types::song::FieldViolation;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Errors raised by the catalog service.
    Catalog(CatalogError),
    /// Field constraint violations found at the boundary.
    Validation(Vec<FieldViolation>),
    /// Request that could not be decoded (body or path).
    BadRequest(String),
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        AppError::Catalog(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Catalog(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            AppError::Catalog(CatalogError::InvalidFormat(_)) => StatusCode::BAD_REQUEST,
            AppError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (message, errors) = match self {
            AppError::Catalog(e) => {
                if status.is_server_error() {
                    tracing::error!(error = %e, "catalog request failed");
                }
                (e.to_string(), None)
            }
            AppError::Validation(violations) => {
                ("Validation failed".to_string(), Some(violations))
            }
            AppError::BadRequest(msg) => (msg, None),
        };

        let mut body = json!({
            "status": status.as_u16(),
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });
        if let Some(violations) = errors {
            body["fieldErrors"] = json!(violations);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playlist_types::song::SongId;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::from(CatalogError::SongNotFound(SongId(1))).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(CatalogError::CategoryNotFound("swing".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(CatalogError::InvalidFormat("bad".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(CatalogError::StorageError("disk".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(AppError::Validation(vec![]).status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_validation_body_lists_field_errors() {
        let response = AppError::Validation(vec![FieldViolation {
            field: "title".to_string(),
            message: "title must not be blank".to_string(),
        }])
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], 400);
        assert_eq!(body["fieldErrors"][0]["field"], "title");
        assert_eq!(body["fieldErrors"][0]["message"], "title must not be blank");
        assert!(body.get("errors").is_none());
    }
}
