use crate::signaling::{IceConfigProvider, RoomDirectory};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{delete, get};
use axum::{Json, Router};
use duet_core::{ConnectionId, IceServerConfig, RoomStatus};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct ApiState {
    directory: Arc<dyn RoomDirectory>,
    ice: IceConfigProvider,
}

impl ApiState {
    pub fn new(directory: Arc<dyn RoomDirectory>, ice: IceConfigProvider) -> Self {
        Self { directory, ice }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub rooms: Vec<RoomStatus>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IceConfigResponse {
    pub ice_servers: Vec<IceServerConfig>,
}

pub fn api_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/status", get(rooms_status))
        .route("/api/config", get(ice_config))
        .route("/api/connections/{id}", delete(disconnect))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn rooms_status(State(state): State<ApiState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        rooms: state.directory.rooms_status().await,
    })
}

async fn ice_config(State(state): State<ApiState>, headers: HeaderMap) -> Json<IceConfigResponse> {
    let host = headers
        .get(header::HOST)
        .or_else(|| headers.get("x-forwarded-host"))
        .and_then(|value| value.to_str().ok());

    Json(IceConfigResponse {
        ice_servers: state.ice.ice_servers(host),
    })
}

async fn disconnect(State(state): State<ApiState>, Path(id): Path<String>) -> StatusCode {
    let Ok(connection_id) = id.parse::<ConnectionId>() else {
        debug!("Disconnect requested with malformed id '{}'", id);
        return StatusCode::NOT_FOUND;
    };

    if state.directory.disconnect(&connection_id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not Found" })))
}
