mod health;
mod learning_path;

use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::ready))
        .route(
            "/api/learning-path/:user_id",
            get(learning_path::get_learning_path),
        )
        .route(
            "/api/learning-path/:user_id/update",
            post(learning_path::update_learning_path),
        )
        .fallback(fallback_handler)
        .with_state(state)
}

async fn fallback_handler() -> Response {
    crate::response::AppError::not_found("route not found").into_response()
}
