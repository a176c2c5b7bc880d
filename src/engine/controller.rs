//! Path update controller. Owns the per-user read-modify-write cycle:
//! ingest one event, update the profile, move the level, refresh the
//! recommendations, persist profile then path state.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::catalog::Catalog;
use crate::engine::persistence::PathPersistence;
use crate::engine::types::{PathEvent, PathState, PerformanceProfile};
use crate::engine::{level, profile, recommend, EngineError};

pub struct PathEngine {
    catalog: Catalog,
    persistence: Option<Arc<PathPersistence>>,
    profiles: RwLock<HashMap<String, PerformanceProfile>>,
    paths: RwLock<HashMap<String, PathState>>,
    // One lock per user: the profile and path state must advance
    // together, and the level must be derived from the profile the
    // same event just updated.
    user_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl PathEngine {
    pub fn new(catalog: Catalog, persistence: Option<Arc<PathPersistence>>) -> Self {
        Self {
            catalog,
            persistence,
            profiles: RwLock::new(HashMap::new()),
            paths: RwLock::new(HashMap::new()),
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the user's path state, creating the default one on
    /// first access (level 1, lowest-difficulty lessons).
    pub async fn get_path(&self, user_id: &str) -> Result<PathState, EngineError> {
        let _guard = self.user_lock(user_id).await;

        let (path, created) = self.load_or_init_path(user_id).await?;
        if created {
            if let Some(ref store) = self.persistence {
                store.save_path(&path).await?;
            }
            self.paths
                .write()
                .await
                .insert(user_id.to_string(), path.clone());
            tracing::info!(user_id, "created default learning path");
        }
        Ok(path)
    }

    /// Applies one interaction event. All-or-nothing: an event that
    /// fails validation upstream or references unknown content leaves
    /// every aggregate untouched.
    pub async fn process_event(
        &self,
        user_id: &str,
        event: PathEvent,
    ) -> Result<PathState, EngineError> {
        let _guard = self.user_lock(user_id).await;

        let item = self
            .catalog
            .find(event.content_id(), event.content_kind())
            .await?
            .ok_or_else(|| {
                EngineError::ContentNotFound(format!(
                    "{} {} is not in the catalog",
                    event.content_kind().as_str(),
                    event.content_id()
                ))
            })?;

        let (mut path, created) = self.load_or_init_path(user_id).await?;
        let mut new_profile: Option<PerformanceProfile> = None;

        match &event {
            // Viewing is activity tracking for other services; the
            // engine records nothing.
            PathEvent::ViewedLesson { .. } | PathEvent::ViewedQuiz { .. } => {}
            PathEvent::CompletedLesson { lesson_id } => {
                if path.completed_lessons.insert(lesson_id.clone()) {
                    path.updated_at = Utc::now();
                }
            }
            PathEvent::CompletedQuiz {
                quiz_id,
                score,
                time_spent_secs,
            } => {
                let mut profile = self.load_or_init_profile(user_id).await?;
                profile::apply(&mut profile, *score, *time_spent_secs, &item.topics);

                path.current_difficulty_level =
                    level::next_level(path.current_difficulty_level, *score);
                path.completed_quizzes.insert(quiz_id.clone());
                path.performance_metrics = profile.summary();

                let lessons = self.catalog.lessons().await?;
                let quizzes = self.catalog.quizzes().await?;
                let recs = recommend::recommend(&lessons, &quizzes, &profile, &path);
                path.recommended_lessons = recs.lessons;
                path.recommended_quizzes = recs.quizzes;
                path.updated_at = Utc::now();

                tracing::debug!(
                    user_id,
                    quiz_id = %quiz_id,
                    score = *score,
                    level = path.current_difficulty_level,
                    "quiz completion applied"
                );
                new_profile = Some(profile);
            }
        }

        // Profile commits before path state so a retry after a partial
        // failure re-derives the level instead of re-applying a delta.
        if let Some(ref store) = self.persistence {
            if let Some(ref profile) = new_profile {
                store.save_profile(user_id, profile).await?;
            }
            if created || path_mutated(&event) {
                store.save_path(&path).await?;
            }
        }

        if let Some(profile) = new_profile {
            self.profiles
                .write()
                .await
                .insert(user_id.to_string(), profile);
        }
        self.paths
            .write()
            .await
            .insert(user_id.to_string(), path.clone());

        Ok(path)
    }

    async fn user_lock(&self, user_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.user_locks.lock().await;
            Arc::clone(
                locks
                    .entry(user_id.to_string())
                    .or_insert_with(|| Arc::new(Mutex::new(()))),
            )
        };
        lock.lock_owned().await
    }

    async fn load_or_init_path(&self, user_id: &str) -> Result<(PathState, bool), EngineError> {
        if let Some(path) = self.paths.read().await.get(user_id) {
            return Ok((path.clone(), false));
        }

        if let Some(ref store) = self.persistence {
            if let Some(path) = store.load_path(user_id).await? {
                self.paths
                    .write()
                    .await
                    .insert(user_id.to_string(), path.clone());
                return Ok((path, false));
            }
        }

        let lessons = self.catalog.lessons().await?;
        let quizzes = self.catalog.quizzes().await?;
        let recs = recommend::default_recommendations(&lessons, &quizzes);

        let mut path = PathState::new(user_id);
        path.recommended_lessons = recs.lessons;
        path.recommended_quizzes = recs.quizzes;
        Ok((path, true))
    }

    async fn load_or_init_profile(&self, user_id: &str) -> Result<PerformanceProfile, EngineError> {
        if let Some(profile) = self.profiles.read().await.get(user_id) {
            return Ok(profile.clone());
        }

        if let Some(ref store) = self.persistence {
            if let Some(profile) = store.load_profile(user_id).await? {
                self.profiles
                    .write()
                    .await
                    .insert(user_id.to_string(), profile.clone());
                return Ok(profile);
            }
        }

        Ok(PerformanceProfile::default())
    }
}

fn path_mutated(event: &PathEvent) -> bool {
    matches!(
        event,
        PathEvent::CompletedLesson { .. } | PathEvent::CompletedQuiz { .. }
    )
}
