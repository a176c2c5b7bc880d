use std::sync::Arc;
use std::time::{Instant, SystemTime};

use crate::cache::RedisCache;
use crate::db::Database;
use crate::engine::PathEngine;

#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    started_at_system: SystemTime,
    db: Option<Arc<Database>>,
    cache: Option<Arc<RedisCache>>,
    engine: Arc<PathEngine>,
}

impl AppState {
    pub fn new(
        db: Option<Arc<Database>>,
        cache: Option<Arc<RedisCache>>,
        engine: Arc<PathEngine>,
    ) -> Self {
        Self {
            started_at: Instant::now(),
            started_at_system: SystemTime::now(),
            db,
            cache,
            engine,
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn started_at_system(&self) -> SystemTime {
        self.started_at_system
    }

    pub fn db(&self) -> Option<Arc<Database>> {
        self.db.clone()
    }

    pub fn cache(&self) -> Option<Arc<RedisCache>> {
        self.cache.clone()
    }

    pub fn engine(&self) -> Arc<PathEngine> {
        Arc::clone(&self.engine)
    }
}
