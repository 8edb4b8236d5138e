use axum::routing::{get, post};
use axum::Router;

pub mod delete;
pub mod download;
pub mod error;
pub mod folder;
pub mod list;
pub mod upload;
pub mod url;

pub use error::StorageApiError;

use crate::state::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/list", get(list::handler))
        .route("/upload", post(upload::handler))
        .route("/download", get(download::handler))
        .route("/folder", post(folder::handler))
        .route("/url", post(url::handler))
        .route("/item", axum::routing::delete(delete::handler))
        .with_state(state)
}
