use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde_json::json;

use common::prelude::StorageError;

/// Failure type shared by the storage endpoints: the core taxonomy plus the
/// request-shaping failures the HTTP layer can hit before reaching the core.
#[derive(Debug, thiserror::Error)]
pub enum StorageApiError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("multipart error: {0}")]
    Multipart(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl IntoResponse for StorageApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            StorageApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            StorageApiError::Multipart(msg) => (StatusCode::BAD_REQUEST, msg),
            StorageApiError::Storage(err) => match err {
                StorageError::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, msg),
                StorageError::AccessDenied => {
                    (StatusCode::FORBIDDEN, "Access denied".to_string())
                }
                // One body for every miss, whether the path never existed or
                // belongs to a different tenant.
                StorageError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
                StorageError::PayloadTooLarge { limit } => (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    format!("file exceeds the maximum allowed size of {limit} bytes"),
                ),
                StorageError::Io(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unexpected error".to_string(),
                ),
            },
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                StorageApiError::Storage(StorageError::AccessDenied),
                StatusCode::FORBIDDEN,
            ),
            (
                StorageApiError::Storage(StorageError::NotFound),
                StatusCode::NOT_FOUND,
            ),
            (
                StorageApiError::Storage(StorageError::PayloadTooLarge { limit: 1 }),
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
            (
                StorageApiError::InvalidRequest("nope".to_string()),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
