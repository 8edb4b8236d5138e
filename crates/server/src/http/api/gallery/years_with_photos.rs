use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use common::prelude::{RelativePath, Storage, StorageError};

use super::super::storage::StorageApiError;
use super::photos::photos_for_year;
use super::{years_in, GALLERY_FOLDER};
use crate::state::ServiceState;

/// Years whose folder holds at least one media file, newest first. Errors
/// on individual year folders count as "no photos" rather than failing the
/// whole sweep.
pub async fn handler(
    State(state): State<ServiceState>,
) -> Result<impl IntoResponse, StorageApiError> {
    let resource = state.config().storage.gallery_resource.clone();
    let gallery_root = RelativePath::normalize(GALLERY_FOLDER, false)?;

    let years = match state.storage().list(&resource, &gallery_root).await {
        Ok(listing) => years_in(&listing),
        Err(StorageError::NotFound) => Vec::new(),
        Err(err) => return Err(err.into()),
    };

    let mut with_photos = Vec::new();
    for year in years {
        if matches!(photos_for_year(&state, year).await, Ok(photos) if !photos.is_empty()) {
            with_photos.push(year);
        }
    }
    with_photos.sort_unstable_by(|a, b| b.cmp(a));

    Ok((http::StatusCode::OK, Json(json!({ "years": with_photos }))).into_response())
}
