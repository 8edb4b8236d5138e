use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use http::header;
use serde::Deserialize;
use tokio_util::io::ReaderStream;

use common::prelude::{RelativePath, Storage, StorageError};

use super::StorageApiError;
use crate::state::ServiceState;

#[derive(Debug, Clone, Deserialize)]
pub struct DownloadQuery {
    /// File to download, relative to the resource root
    #[serde(default)]
    pub path: String,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Path(resource): Path<String>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, StorageApiError> {
    let path = RelativePath::normalize(&query.path, true)?;

    let Some(download) = state.storage().download(&resource, &path).await? else {
        return Err(StorageApiError::Storage(StorageError::NotFound));
    };

    // Stored names never contain quotes (sanitization replaces them), so
    // plain quoting is enough here.
    let disposition = format!("attachment; filename=\"{}\"", download.filename);
    let body = Body::from_stream(ReaderStream::new(download.file));

    Ok((
        http::StatusCode::OK,
        [
            (header::CONTENT_TYPE, download.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CONTENT_LENGTH, download.len.to_string()),
        ],
        body,
    )
        .into_response())
}
