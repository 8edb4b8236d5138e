use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use common::prelude::{RelativePath, Storage};

use super::StorageApiError;
use crate::state::ServiceState;

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteQuery {
    /// File or directory to delete, relative to the resource root
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Path(resource): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> Result<impl IntoResponse, StorageApiError> {
    let path = RelativePath::normalize(&query.path, true)?;

    state.storage().delete(&resource, &path).await?;

    tracing::info!("Deleted '{}' from resource {}", path, resource);

    Ok((
        http::StatusCode::OK,
        Json(DeleteResponse {
            message: "Item deleted successfully".to_string(),
        }),
    )
        .into_response())
}
