use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderName, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use rust_embed::RustEmbed;
use tokio::sync::watch;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_http::trace::{DefaultOnFailure, DefaultOnResponse};
use tower_http::LatencyUnit;

pub mod api;
pub mod health;

use crate::config::CorsConfig;
use crate::state::ServiceState;

const API_PREFIX: &str = "/api";
const STATUS_PREFIX: &str = "/_status";

#[derive(RustEmbed)]
#[folder = "static"]
struct StaticAssets;

async fn static_handler(uri: Uri) -> impl IntoResponse {
    let path = uri
        .path()
        .trim_start_matches('/')
        .trim_start_matches("static/");

    serve_asset(path)
}

/// The browser UI: every non-API route falls back to the index page.
async fn index_handler() -> impl IntoResponse {
    serve_asset("index.html")
}

fn serve_asset(path: &str) -> Response {
    match StaticAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, mime.as_ref())
                .body(Body::from(content.data.to_vec()))
                .unwrap()
        }
        None => match StaticAssets::get("404.html") {
            Some(content) => Response::builder()
                .status(StatusCode::NOT_FOUND)
                .header(header::CONTENT_TYPE, "text/html")
                .body(Body::from(content.data.to_vec()))
                .unwrap(),
            None => Response::builder()
                .status(StatusCode::NOT_FOUND)
                .body(Body::from("Not Found"))
                .unwrap(),
        },
    }
}

/// Assemble the full application router: API + health + embedded UI.
pub fn router(state: ServiceState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .on_response(
            DefaultOnResponse::new()
                .include_headers(false)
                .latency_unit(LatencyUnit::Micros),
        )
        .on_failure(DefaultOnFailure::new().latency_unit(LatencyUnit::Micros));

    let cors_layer = cors_layer(&state.config().cors);
    let body_limit = state.config().storage.max_upload_size as usize;

    Router::new()
        .nest(STATUS_PREFIX, health::router(state.clone()))
        .nest(API_PREFIX, api::router(state.clone()))
        .route("/static/*path", axum::routing::get(static_handler))
        .fallback(index_handler)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
        .layer(cors_layer)
        .layer(trace_layer)
}

/// Build the CORS layer from config. Without configured origins the layer
/// stays restrictive and blocks cross-origin requests.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    if !config.is_configured() {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let mut layer = CorsLayer::new().allow_origin(AllowOrigin::list(origins));

    layer = if config.allowed_headers.is_empty() {
        layer.allow_headers(AllowHeaders::mirror_request())
    } else {
        let headers: Vec<HeaderName> = config
            .allowed_headers
            .iter()
            .filter_map(|name| name.parse().ok())
            .collect();
        layer.allow_headers(AllowHeaders::list(headers))
    };

    layer = if config.allowed_methods.is_empty() {
        layer.allow_methods(AllowMethods::mirror_request())
    } else {
        let methods: Vec<Method> = config
            .allowed_methods
            .iter()
            .filter_map(|name| name.parse().ok())
            .collect();
        layer.allow_methods(AllowMethods::list(methods))
    };

    if config.allow_credentials {
        layer = layer.allow_credentials(true);
    }

    layer
}

/// Run the HTTP server until the shutdown signal fires.
pub async fn run(
    state: ServiceState,
    listen_addr: SocketAddr,
    mut shutdown_rx: watch::Receiver<()>,
) -> Result<(), HttpServerError> {
    let router = router(state);

    tracing::info!(addr = ?listen_addr, "HTTP server listening");
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
        })
        .await?;

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum HttpServerError {
    #[error("an error occurred running the HTTP server: {0}")]
    ServingFailed(#[from] std::io::Error),
}
