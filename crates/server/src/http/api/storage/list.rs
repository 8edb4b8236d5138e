use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use common::prelude::{RelativePath, Storage};

use super::StorageApiError;
use crate::state::ServiceState;

#[derive(Debug, Clone, Deserialize)]
pub struct ListQuery {
    /// Directory to list, relative to the resource root
    #[serde(default)]
    pub path: String,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Path(resource): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, StorageApiError> {
    let path = RelativePath::normalize(&query.path, false)?;
    let listing = state.storage().list(&resource, &path).await?;

    Ok((http::StatusCode::OK, Json(listing)).into_response())
}
