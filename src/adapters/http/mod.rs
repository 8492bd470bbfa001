//! HTTP adapter - JSON API over the single in-process session.

pub mod session;

use std::time::Duration;

use axum::http::{HeaderValue, Method};
use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::application::SessionHandle;
use crate::config::ServerConfig;

pub use session::{health, session_routes, ErrorResponse};

/// Builds the full application router with tracing, CORS, and timeouts.
pub fn build_router(session: SessionHandle, server: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/session", session_routes(session))
        .layer(cors_layer(server))
        .layer(TimeoutLayer::new(Duration::from_secs(server.request_timeout_secs)))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .allowed_origins()
        .into_iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() && !server.is_production() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(Any)
}
