use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use common::prelude::{RelativePath, Storage, StorageEntry};

use super::StorageApiError;
use crate::state::ServiceState;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateFolderQuery {
    /// Parent directory, relative to the resource root
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateFolderRequest {
    /// Desired folder name; an empty name gets the default label
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateFolderResponse {
    pub message: String,
    pub item: StorageEntry,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Path(resource): Path<String>,
    Query(query): Query<CreateFolderQuery>,
    Json(request): Json<CreateFolderRequest>,
) -> Result<impl IntoResponse, StorageApiError> {
    let path = RelativePath::normalize(&query.path, false)?;

    let item = state
        .storage()
        .create_folder(&resource, &path, &request.name)
        .await?;

    Ok((
        http::StatusCode::OK,
        Json(CreateFolderResponse {
            message: "Folder created successfully".to_string(),
            item,
        }),
    )
        .into_response())
}
