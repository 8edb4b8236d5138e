use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use common::prelude::{RelativePath, Storage, StorageError};

use super::super::storage::StorageApiError;
use super::{years_in, GALLERY_FOLDER};
use crate::state::ServiceState;

/// All years with a gallery folder, newest first. A missing gallery tree is
/// an empty gallery, not an error.
pub async fn handler(
    State(state): State<ServiceState>,
) -> Result<impl IntoResponse, StorageApiError> {
    let resource = state.config().storage.gallery_resource.clone();
    let path = RelativePath::normalize(GALLERY_FOLDER, false)?;

    let mut years = match state.storage().list(&resource, &path).await {
        Ok(listing) => years_in(&listing),
        Err(StorageError::NotFound) => Vec::new(),
        Err(err) => return Err(err.into()),
    };
    years.sort_unstable_by(|a, b| b.cmp(a));

    Ok((http::StatusCode::OK, Json(json!({ "years": years }))).into_response())
}
