use std::sync::Arc;

use crate::db::operations::{get_path_state, get_profile, upsert_path_state, upsert_profile};
use crate::db::Database;
use crate::engine::types::{PathState, PerformanceProfile};
use crate::engine::EngineError;

/// Durable storage for the engine-owned aggregates. Each aggregate is
/// replaced whole on write; the caller commits the profile before the
/// path state so a retry after a partial failure can re-derive the
/// level from the already-updated profile.
pub struct PathPersistence {
    db: Arc<Database>,
}

impl PathPersistence {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn load_profile(&self, user_id: &str) -> Result<Option<PerformanceProfile>, EngineError> {
        get_profile(&self.db, user_id)
            .await
            .map_err(|e| EngineError::Store(e.to_string()))
    }

    pub async fn save_profile(
        &self,
        user_id: &str,
        profile: &PerformanceProfile,
    ) -> Result<(), EngineError> {
        upsert_profile(&self.db, user_id, profile)
            .await
            .map_err(|e| EngineError::Store(e.to_string()))
    }

    pub async fn load_path(&self, user_id: &str) -> Result<Option<PathState>, EngineError> {
        get_path_state(&self.db, user_id)
            .await
            .map_err(|e| EngineError::Store(e.to_string()))
    }

    pub async fn save_path(&self, path: &PathState) -> Result<(), EngineError> {
        upsert_path_state(&self.db, path)
            .await
            .map_err(|e| EngineError::Store(e.to_string()))
    }
}
