use crate::config::ServerConfig;
use crate::http::{ApiState, api_router, not_found};
use crate::signaling::{RoomDirectory, SignalingService, ws_handler};
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Full HTTP surface: the signaling WebSocket endpoint plus the JSON API.
pub fn app(service: SignalingService, config: &ServerConfig) -> Router {
    // Browser clients are served from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let directory: Arc<dyn RoomDirectory> = Arc::new(service.clone());
    let api = api_router(ApiState::new(directory, config.ice_config()));

    Router::new()
        .route(&config.ws_path(), get(ws_handler))
        .with_state(service)
        .merge(api)
        .fallback(not_found)
        .layer(cors)
}
