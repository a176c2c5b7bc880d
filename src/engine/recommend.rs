//! Recommendation engine. Pure function of catalog + profile + path
//! state: pick uncompleted lessons inside the 0.5 difficulty band
//! around the user's level, weakness-covering ones first, catalog
//! order as the tie-break, capped at five. Quizzes follow their
//! recommended lessons.

use crate::catalog::ContentItem;
use crate::engine::types::{PathState, PerformanceProfile};

pub const MAX_RECOMMENDED_LESSONS: usize = 5;
pub const DIFFICULTY_BAND: f64 = 0.5;
pub const DEFAULT_PATH_LESSONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Recommendations {
    pub lessons: Vec<String>,
    pub quizzes: Vec<String>,
}

pub fn recommend(
    lessons: &[ContentItem],
    quizzes: &[ContentItem],
    profile: &PerformanceProfile,
    path: &PathState,
) -> Recommendations {
    let weaknesses = profile.weaknesses();
    let level = path.current_difficulty_level;

    let candidates: Vec<&ContentItem> = lessons
        .iter()
        .filter(|lesson| {
            (lesson.difficulty - level).abs() <= DIFFICULTY_BAND
                && !path.completed_lessons.contains(&lesson.id)
        })
        .collect();

    let mut recommended: Vec<String> = Vec::new();
    for lesson in candidates.iter().filter(|l| l.covers_any(&weaknesses)) {
        recommended.push(lesson.id.clone());
    }
    for lesson in &candidates {
        if !recommended.contains(&lesson.id) {
            recommended.push(lesson.id.clone());
        }
    }
    recommended.truncate(MAX_RECOMMENDED_LESSONS);

    let recommended_quizzes = quizzes_for(quizzes, &recommended, path);

    Recommendations {
        lessons: recommended,
        quizzes: recommended_quizzes,
    }
}

/// Initial recommendation set for a brand-new path: the lowest
/// difficulty lessons in the catalog, ties kept in catalog order.
pub fn default_recommendations(lessons: &[ContentItem], quizzes: &[ContentItem]) -> Recommendations {
    let mut sorted: Vec<&ContentItem> = lessons.iter().collect();
    sorted.sort_by(|a, b| a.difficulty.total_cmp(&b.difficulty));

    let recommended: Vec<String> = sorted
        .iter()
        .take(DEFAULT_PATH_LESSONS)
        .map(|l| l.id.clone())
        .collect();

    let empty_path = PathState::new("");
    let recommended_quizzes = quizzes_for(quizzes, &recommended, &empty_path);

    Recommendations {
        lessons: recommended,
        quizzes: recommended_quizzes,
    }
}

fn quizzes_for(quizzes: &[ContentItem], lesson_ids: &[String], path: &PathState) -> Vec<String> {
    quizzes
        .iter()
        .filter(|quiz| {
            quiz.lesson_id
                .as_deref()
                .is_some_and(|lesson| lesson_ids.iter().any(|id| id == lesson))
                && !path.completed_quizzes.contains(&quiz.id)
        })
        .map(|quiz| quiz.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::profile;

    fn sample_lessons() -> Vec<ContentItem> {
        vec![
            ContentItem::lesson("l1", "Counting", 1.0, &["arithmetic"]),
            ContentItem::lesson("l2", "Fractions I", 1.0, &["fractions"]),
            ContentItem::lesson("l3", "Fractions II", 1.5, &["fractions"]),
            ContentItem::lesson("l4", "Algebra I", 2.5, &["algebra"]),
            ContentItem::lesson("l5", "Shapes", 1.0, &["geometry"]),
            ContentItem::lesson("l6", "Decimals", 1.5, &["arithmetic"]),
            ContentItem::lesson("l7", "Ratios", 1.0, &["fractions", "arithmetic"]),
        ]
    }

    fn sample_quizzes() -> Vec<ContentItem> {
        vec![
            ContentItem::quiz("q1", "Counting quiz", 1.0, &["arithmetic"], "l1"),
            ContentItem::quiz("q2", "Fractions quiz", 1.0, &["fractions"], "l2"),
            ContentItem::quiz("q4", "Algebra quiz", 2.5, &["algebra"], "l4"),
        ]
    }

    #[test]
    fn band_filter_and_cap() {
        let path = PathState::new("u1");
        let result = recommend(
            &sample_lessons(),
            &sample_quizzes(),
            &PerformanceProfile::default(),
            &path,
        );
        // Level 1.0 band covers difficulties 1.0 and 1.5; l4 is out.
        assert_eq!(result.lessons, vec!["l1", "l2", "l3", "l5", "l6"]);
        assert!(!result.lessons.contains(&"l4".to_string()));
    }

    #[test]
    fn weakness_topics_come_first() {
        let mut profile = PerformanceProfile::default();
        profile::apply(&mut profile, 40.0, 60, &["fractions".to_string()]);

        let path = PathState::new("u1");
        let result = recommend(&sample_lessons(), &sample_quizzes(), &profile, &path);
        assert_eq!(result.lessons, vec!["l2", "l3", "l7", "l1", "l5"]);
    }

    #[test]
    fn completed_lessons_are_excluded() {
        let mut path = PathState::new("u1");
        path.completed_lessons.insert("l1".to_string());
        path.completed_quizzes.insert("q2".to_string());

        let result = recommend(
            &sample_lessons(),
            &sample_quizzes(),
            &PerformanceProfile::default(),
            &path,
        );
        assert!(!result.lessons.contains(&"l1".to_string()));
        assert!(!result.quizzes.contains(&"q2".to_string()));
    }

    #[test]
    fn empty_band_means_empty_output() {
        let mut path = PathState::new("u1");
        path.current_difficulty_level = 5.0;

        let result = recommend(
            &sample_lessons(),
            &sample_quizzes(),
            &PerformanceProfile::default(),
            &path,
        );
        assert!(result.lessons.is_empty());
        assert!(result.quizzes.is_empty());
    }

    #[test]
    fn recommend_is_deterministic() {
        let mut profile = PerformanceProfile::default();
        profile::apply(&mut profile, 45.0, 90, &["arithmetic".to_string()]);
        let path = PathState::new("u1");

        let first = recommend(&sample_lessons(), &sample_quizzes(), &profile, &path);
        let second = recommend(&sample_lessons(), &sample_quizzes(), &profile, &path);
        assert_eq!(first, second);
    }

    #[test]
    fn default_path_takes_lowest_difficulty_lessons() {
        let result = default_recommendations(&sample_lessons(), &sample_quizzes());
        assert_eq!(result.lessons, vec!["l1", "l2", "l5"]);
        assert_eq!(result.quizzes, vec!["q1", "q2"]);
    }
}
