pub mod cache;
pub mod catalog;
pub mod config;
pub mod db;
pub mod engine;
pub mod logging;
pub mod response;
pub mod routes;
pub mod state;

use std::sync::Arc;

use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::cache::RedisCache;
use crate::catalog::Catalog;
use crate::engine::persistence::PathPersistence;
use crate::engine::PathEngine;
use crate::state::AppState;

/// Builds the full application from the environment. Missing backing
/// services degrade to in-memory operation rather than failing boot.
pub async fn create_app() -> axum::Router {
    let db = match db::Database::from_env().await {
        Ok(db) => Some(db),
        Err(err) => {
            tracing::warn!(error = %err, "database not initialized, running store-less");
            None
        }
    };

    let cache = match std::env::var("REDIS_URL") {
        Ok(url) => match RedisCache::connect(&url).await {
            Ok(cache) => Some(Arc::new(cache)),
            Err(err) => {
                tracing::warn!(error = %err, "redis not initialized, running cache-less");
                None
            }
        },
        Err(_) => None,
    };

    let state = build_state(db, cache);

    routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub fn build_state(
    db: Option<Arc<db::Database>>,
    cache: Option<Arc<RedisCache>>,
) -> AppState {
    let catalog = match db {
        Some(ref db) => Catalog::Postgres(Arc::clone(db)),
        None => Catalog::in_memory(Vec::new()),
    };
    let persistence = db
        .as_ref()
        .map(|db| Arc::new(PathPersistence::new(Arc::clone(db))));
    let engine = Arc::new(PathEngine::new(catalog, persistence));

    AppState::new(db, cache, engine)
}
