//! Gallery convenience endpoints.
//!
//! Thin glue over the storage capability: photos live in the configured
//! gallery resource under `gallery/{year}/`, and these routes shape that
//! layout for gallery clients. No invariants of their own.

use axum::routing::get;
use axum::Router;

pub mod has_photos;
pub mod photos;
pub mod years;
pub mod years_with_photos;

use common::engine::Listing;
use common::entry::{extension_of, EntryKind};

use crate::state::ServiceState;

pub(crate) const GALLERY_FOLDER: &str = "gallery";

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".webp", ".svg"];
const DOCUMENT_EXTENSIONS: &[&str] = &[".pdf"];

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/years", get(years::handler))
        .route("/photos", get(photos::handler))
        .route("/has-photos", get(has_photos::handler))
        .route("/years-with-photos", get(years_with_photos::handler))
        .with_state(state)
}

pub(crate) fn is_image(filename: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&extension_of(filename).as_str())
}

pub(crate) fn is_media(filename: &str) -> bool {
    let extension = extension_of(filename);
    IMAGE_EXTENSIONS.contains(&extension.as_str())
        || DOCUMENT_EXTENSIONS.contains(&extension.as_str())
}

/// Years present in a gallery root listing: folders whose name parses as an
/// integer.
pub(crate) fn years_in(listing: &Listing) -> Vec<i32> {
    listing
        .items
        .iter()
        .filter(|item| item.kind == EntryKind::Folder)
        .filter_map(|item| item.filename.parse::<i32>().ok())
        .collect()
}

/// Percent-encoded download link for a stored path.
pub(crate) fn download_url(resource: &str, path: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(path.as_bytes()).collect();
    format!("/api/v0/{resource}/storage/download?path={encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_classification() {
        assert!(is_image("shot.JPG"));
        assert!(is_image("vector.svg"));
        assert!(!is_image("scan.pdf"));

        assert!(is_media("scan.pdf"));
        assert!(is_media("shot.png"));
        assert!(!is_media("notes.txt"));
        assert!(!is_media("bookmark.url"));
    }

    #[test]
    fn test_download_url_is_percent_encoded() {
        let url = download_url("public", "gallery/2024/summer trip.jpg");
        assert_eq!(
            url,
            "/api/v0/public/storage/download?path=gallery%2F2024%2Fsummer+trip.jpg"
        );
    }
}
