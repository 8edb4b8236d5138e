use axum::Router;

pub mod gallery;
pub mod storage;

use crate::state::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .nest("/v0/:resource/storage", storage::router(state.clone()))
        .nest("/v0/gallery", gallery::router(state.clone()))
        .with_state(state)
}
