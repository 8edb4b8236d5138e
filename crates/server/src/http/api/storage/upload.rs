use std::io;

use axum::extract::{Multipart, Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use futures::TryStreamExt;
use serde::{Deserialize, Serialize};

use common::prelude::{IncomingFile, RelativePath, Storage, StorageEntry};

use super::StorageApiError;
use crate::state::ServiceState;

#[derive(Debug, Clone, Deserialize)]
pub struct UploadQuery {
    /// Directory to upload into, relative to the resource root
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub files: Vec<StorageEntry>,
}

/// Multipart fields arrive one at a time, so each file field is handed to
/// the engine as it is parsed; the field's chunk stream goes straight to
/// disk without ever materializing the file in memory.
pub async fn handler(
    State(state): State<ServiceState>,
    Path(resource): Path<String>,
    Query(query): Query<UploadQuery>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, StorageApiError> {
    let path = RelativePath::normalize(&query.path, false)?;

    let mut stored = Vec::new();
    let mut saw_file = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| StorageApiError::Multipart(err.to_string()))?
    {
        // Only file fields carry a filename; everything else is ignored.
        let Some(filename) = field.file_name().map(|name| name.to_string()) else {
            continue;
        };
        saw_file = true;

        let content = field.map_err(|err| io::Error::new(io::ErrorKind::Other, err));
        let incoming = IncomingFile {
            filename,
            content: Box::pin(content),
        };

        let entries = state.storage().upload(&resource, &path, vec![incoming]).await?;
        stored.extend(entries);
    }

    if !saw_file {
        return Err(StorageApiError::InvalidRequest(
            "no files provided".to_string(),
        ));
    }

    tracing::info!(
        "Stored {} file(s) for resource {} at path '{}'",
        stored.len(),
        resource,
        path
    );

    Ok((
        http::StatusCode::OK,
        Json(UploadResponse {
            message: "Files uploaded successfully".to_string(),
            files: stored,
        }),
    )
        .into_response())
}
