use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::ContentKind;
use crate::engine::EngineError;

pub const WEAKNESS_THRESHOLD: f64 = 60.0;
pub const STRENGTH_THRESHOLD: f64 = 80.0;

/// Validated interaction event. Built at the HTTP boundary from the
/// raw payload; the controller never sees malformed input.
#[derive(Debug, Clone, PartialEq)]
pub enum PathEvent {
    ViewedLesson { lesson_id: String },
    ViewedQuiz { quiz_id: String },
    CompletedLesson { lesson_id: String },
    CompletedQuiz {
        quiz_id: String,
        score: f64,
        time_spent_secs: i64,
    },
}

impl PathEvent {
    /// Validates the wire fields and builds the tagged event.
    pub fn from_parts(
        content_id: &str,
        content_type: &str,
        action: &str,
        score: Option<f64>,
        time_spent: Option<i64>,
    ) -> Result<Self, EngineError> {
        if content_id.trim().is_empty() {
            return Err(EngineError::Validation("contentId is required".to_string()));
        }
        let kind = ContentKind::parse(content_type).ok_or_else(|| {
            EngineError::Validation(format!("unknown contentType: {content_type}"))
        })?;
        let completed = match action.to_lowercase().as_str() {
            "completed" => true,
            "viewed" => false,
            other => {
                return Err(EngineError::Validation(format!("unknown action: {other}")));
            }
        };

        let event = match (kind, completed) {
            (ContentKind::Lesson, false) => Self::ViewedLesson {
                lesson_id: content_id.to_string(),
            },
            (ContentKind::Quiz, false) => Self::ViewedQuiz {
                quiz_id: content_id.to_string(),
            },
            (ContentKind::Lesson, true) => Self::CompletedLesson {
                lesson_id: content_id.to_string(),
            },
            (ContentKind::Quiz, true) => {
                let score = score.ok_or_else(|| {
                    EngineError::Validation(
                        "score is required for a completed quiz".to_string(),
                    )
                })?;
                if !(0.0..=100.0).contains(&score) {
                    return Err(EngineError::Validation(format!(
                        "score must be within 0-100, got {score}"
                    )));
                }
                let time_spent_secs = time_spent.unwrap_or(0);
                if time_spent_secs < 0 {
                    return Err(EngineError::Validation(format!(
                        "timeSpent must be non-negative, got {time_spent_secs}"
                    )));
                }
                Self::CompletedQuiz {
                    quiz_id: content_id.to_string(),
                    score,
                    time_spent_secs,
                }
            }
        };

        Ok(event)
    }

    pub fn content_id(&self) -> &str {
        match self {
            Self::ViewedLesson { lesson_id } | Self::CompletedLesson { lesson_id } => lesson_id,
            Self::ViewedQuiz { quiz_id } => quiz_id,
            Self::CompletedQuiz { quiz_id, .. } => quiz_id,
        }
    }

    pub fn content_kind(&self) -> ContentKind {
        match self {
            Self::ViewedLesson { .. } | Self::CompletedLesson { .. } => ContentKind::Lesson,
            Self::ViewedQuiz { .. } | Self::CompletedQuiz { .. } => ContentKind::Quiz,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopicStats {
    pub scores: Vec<f64>,
    pub average_score: f64,
}

/// Per-user performance aggregate. Append-only; every average is the
/// arithmetic mean of its backing sequence after every update.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceProfile {
    pub quiz_scores: Vec<f64>,
    pub average_score: f64,
    pub completion_times: Vec<i64>,
    pub average_completion_time: f64,
    pub topics: BTreeMap<String, TopicStats>,
}

impl PerformanceProfile {
    /// Topics the user is struggling with (average below 60).
    pub fn weaknesses(&self) -> Vec<String> {
        self.topics
            .iter()
            .filter(|(_, stats)| stats.average_score < WEAKNESS_THRESHOLD)
            .map(|(topic, _)| topic.clone())
            .collect()
    }

    /// Topics the user is doing well in (average at or above 80).
    pub fn strengths(&self) -> Vec<String> {
        self.topics
            .iter()
            .filter(|(_, stats)| stats.average_score >= STRENGTH_THRESHOLD)
            .map(|(topic, _)| topic.clone())
            .collect()
    }

    pub fn summary(&self) -> PerformanceSummary {
        PerformanceSummary {
            average_quiz_score: self.average_score,
            average_completion_time: self.average_completion_time,
            strengths: self.strengths(),
            weaknesses: self.weaknesses(),
        }
    }
}

/// The slice of the profile that rides along in the path response.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    pub average_quiz_score: f64,
    pub average_completion_time: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

/// Per-user path record: placement level, completion sets, and the
/// current recommendation set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PathState {
    pub user_id: String,
    pub current_difficulty_level: f64,
    pub completed_lessons: BTreeSet<String>,
    pub completed_quizzes: BTreeSet<String>,
    pub recommended_lessons: Vec<String>,
    pub recommended_quizzes: Vec<String>,
    pub performance_metrics: PerformanceSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PathState {
    pub fn new(user_id: &str) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.to_string(),
            current_difficulty_level: crate::engine::level::MIN_LEVEL,
            completed_lessons: BTreeSet::new(),
            completed_quizzes: BTreeSet::new(),
            recommended_lessons: Vec::new(),
            recommended_quizzes: Vec::new(),
            performance_metrics: PerformanceSummary::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_builds_completed_quiz() {
        let event =
            PathEvent::from_parts("q1", "quiz", "completed", Some(85.0), Some(120)).unwrap();
        assert_eq!(
            event,
            PathEvent::CompletedQuiz {
                quiz_id: "q1".to_string(),
                score: 85.0,
                time_spent_secs: 120,
            }
        );
    }

    #[test]
    fn from_parts_rejects_out_of_range_score() {
        let err = PathEvent::from_parts("q1", "quiz", "completed", Some(101.0), None).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn from_parts_rejects_missing_score() {
        let err = PathEvent::from_parts("q1", "quiz", "completed", None, None).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn from_parts_rejects_negative_time() {
        let err =
            PathEvent::from_parts("q1", "quiz", "completed", Some(50.0), Some(-1)).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn from_parts_rejects_unknown_kind_and_action() {
        assert!(PathEvent::from_parts("c1", "video", "completed", None, None).is_err());
        assert!(PathEvent::from_parts("c1", "lesson", "skipped", None, None).is_err());
    }

    #[test]
    fn viewed_lesson_needs_no_score() {
        let event = PathEvent::from_parts("l1", "lesson", "viewed", None, None).unwrap();
        assert_eq!(event.content_id(), "l1");
        assert_eq!(event.content_kind(), ContentKind::Lesson);
    }
}
