//! Main entrypoint for the web application

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::Extension,
    http::Request,
    routing::get,
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    services::ServeDir,
    trace::{
        DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
    },
    LatencyUnit,
};
use tracing::Level;

use crate::config::Config;
use crate::downloader::Downloader;
use crate::web::handlers;

/// Everything the handlers need, constructed once at startup.
pub struct AppState {
    pub config: Config,
    pub downloader: Downloader,
    pub media_dir: PathBuf,
}

pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/feed.xml", get(handlers::get_feed))
        .route("/add", get(handlers::add).post(handlers::add))
        .nest_service("/files", ServeDir::new(&state.media_dir))
        .layer(Extension(state))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "http-request",
                        method = request.method().as_str(),
                        uri = request
                            .uri()
                            .path_and_query()
                            .map_or("", |p| p.as_str()),
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Micros),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR)
                        .latency_unit(LatencyUnit::Micros),
                ),
        )
        .layer(CompressionLayer::new())
}
