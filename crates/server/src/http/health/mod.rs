use axum::routing::get;
use axum::Router;

pub mod healthz;
pub mod version;

use crate::state::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/healthz", get(healthz::handler))
        .route("/version", get(version::handler))
        .with_state(state)
}
