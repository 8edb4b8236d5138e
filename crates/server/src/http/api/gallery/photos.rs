use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use common::prelude::{RelativePath, Storage, StorageError};

use super::super::storage::StorageApiError;
use super::{download_url, is_image, is_media, years_in, GALLERY_FOLDER};
use crate::state::ServiceState;

#[derive(Debug, Clone, Deserialize)]
pub struct PhotosQuery {
    /// Restrict to one year; omitted means every year
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub filename: String,
    pub path: RelativePath,
    pub filename_without_extension: String,
    pub year: i32,
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: &'static str,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Query(query): Query<PhotosQuery>,
) -> Result<impl IntoResponse, StorageApiError> {
    if let Some(year) = query.year {
        let photos = photos_for_year(&state, year).await?;
        return Ok((http::StatusCode::OK, Json(json!({ "photos": photos, "year": year })))
            .into_response());
    }

    // No year filter: walk every year folder and flatten.
    let resource = state.config().storage.gallery_resource.clone();
    let gallery_root = RelativePath::normalize(GALLERY_FOLDER, false)?;

    let years = match state.storage().list(&resource, &gallery_root).await {
        Ok(listing) => years_in(&listing),
        Err(StorageError::NotFound) => Vec::new(),
        Err(err) => return Err(err.into()),
    };

    let mut all_photos = Vec::new();
    for year in years {
        all_photos.extend(photos_for_year(&state, year).await?);
    }

    Ok((http::StatusCode::OK, Json(json!({ "photos": all_photos }))).into_response())
}

/// Media files directly under `gallery/{year}`. A missing year folder is an
/// empty year.
pub(crate) async fn photos_for_year(
    state: &ServiceState,
    year: i32,
) -> Result<Vec<Photo>, StorageApiError> {
    let resource = &state.config().storage.gallery_resource;
    let path = RelativePath::normalize(&format!("{GALLERY_FOLDER}/{year}"), false)?;

    let listing = match state.storage().list(resource, &path).await {
        Ok(listing) => listing,
        Err(StorageError::NotFound) => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    Ok(listing
        .items
        .into_iter()
        .filter(|item| item.kind == common::entry::EntryKind::File && is_media(&item.filename))
        .map(|item| {
            let media_type = if is_image(&item.filename) {
                "image"
            } else {
                "pdf"
            };
            Photo {
                url: download_url(resource, item.path.as_str()),
                filename: item.filename,
                path: item.path,
                filename_without_extension: item.filename_without_extension,
                year,
                media_type,
            }
        })
        .collect())
}
