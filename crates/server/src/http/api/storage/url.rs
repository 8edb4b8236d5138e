use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use common::prelude::{RelativePath, Storage, StorageEntry};

use super::StorageApiError;
use crate::state::ServiceState;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUrlQuery {
    /// Parent directory, relative to the resource root
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUrlRequest {
    /// Desired shortcut name; an empty name gets the default label
    #[serde(default)]
    pub name: String,
    /// Absolute http/https target
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateUrlResponse {
    pub message: String,
    pub item: StorageEntry,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Path(resource): Path<String>,
    Query(query): Query<CreateUrlQuery>,
    Json(request): Json<CreateUrlRequest>,
) -> Result<impl IntoResponse, StorageApiError> {
    let path = RelativePath::normalize(&query.path, false)?;

    let item = state
        .storage()
        .create_url(&resource, &path, &request.name, &request.url)
        .await?;

    Ok((
        http::StatusCode::OK,
        Json(CreateUrlResponse {
            message: "URL created successfully".to_string(),
            item,
        }),
    )
        .into_response())
}
