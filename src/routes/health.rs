use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReadyResponse {
    status: &'static str,
    database: &'static str,
    cache: &'static str,
    uptime: u64,
}

pub async fn health() -> Response {
    Json(HealthResponse {
        status: "healthy",
        service: "path-engine",
    })
    .into_response()
}

pub async fn ready(State(state): State<AppState>) -> Response {
    let database = match state.db() {
        Some(db) => {
            if db.is_healthy().await {
                "connected"
            } else {
                "disconnected"
            }
        }
        None => "not configured",
    };
    let cache = match state.cache() {
        Some(cache) => {
            if cache.is_connected().await {
                "connected"
            } else {
                "disconnected"
            }
        }
        None => "not configured",
    };

    let degraded = database == "disconnected";
    let response = ReadyResponse {
        status: if degraded { "degraded" } else { "ok" },
        database,
        cache,
        uptime: state.uptime_seconds(),
    };

    let status_code = if degraded {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };
    (status_code, Json(response)).into_response()
}
