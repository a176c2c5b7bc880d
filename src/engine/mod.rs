pub mod controller;
pub mod level;
pub mod persistence;
pub mod profile;
pub mod recommend;
pub mod types;

pub use controller::PathEngine;
pub use recommend::Recommendations;
pub use types::{PathEvent, PathState, PerformanceProfile};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("content not found: {0}")]
    ContentNotFound(String),
    #[error("store unavailable: {0}")]
    Store(String),
}
