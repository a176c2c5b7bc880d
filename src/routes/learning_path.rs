use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::cache::keys::{learning_path_key, LEARNING_PATH_TTL};
use crate::engine::types::{PathEvent, PathState};
use crate::response::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPathResponse {
    pub learning_path: PathState,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub message: &'static str,
    pub learning_path: PathState,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePathRequest {
    pub content_id: String,
    pub content_type: String,
    pub action: String,
    pub score: Option<f64>,
    pub time_spent: Option<i64>,
}

pub async fn get_learning_path(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<LearningPathResponse>, AppError> {
    let key = learning_path_key(&user_id);

    if let Some(cache) = state.cache() {
        if let Some(cached) = cache.get::<PathState>(&key).await {
            return Ok(Json(LearningPathResponse {
                learning_path: cached,
            }));
        }
    }

    let path = state.engine().get_path(&user_id).await?;

    if let Some(cache) = state.cache() {
        cache.set(&key, &path, LEARNING_PATH_TTL).await;
    }

    Ok(Json(LearningPathResponse {
        learning_path: path,
    }))
}

pub async fn update_learning_path(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(payload): Json<UpdatePathRequest>,
) -> Result<Json<UpdateResponse>, AppError> {
    let event = PathEvent::from_parts(
        &payload.content_id,
        &payload.content_type,
        &payload.action,
        payload.score,
        payload.time_spent,
    )?;

    let path = state.engine().process_event(&user_id, event).await?;

    if let Some(cache) = state.cache() {
        cache
            .set(&learning_path_key(&user_id), &path, LEARNING_PATH_TTL)
            .await;
    }

    Ok(Json(UpdateResponse {
        message: "learning path updated successfully",
        learning_path: path,
    }))
}
