use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::super::storage::StorageApiError;
use super::photos::photos_for_year;
use crate::state::ServiceState;

#[derive(Debug, Clone, Deserialize)]
pub struct HasPhotosQuery {
    pub year: i32,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Query(query): Query<HasPhotosQuery>,
) -> Result<impl IntoResponse, StorageApiError> {
    let has_photos = !photos_for_year(&state, query.year).await?.is_empty();

    Ok((
        http::StatusCode::OK,
        Json(json!({ "hasPhotos": has_photos, "year": query.year })),
    )
        .into_response())
}
