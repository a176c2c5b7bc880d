//! Property tests for the numeric invariants: levels stay in [1, 5]
//! and stored averages never drift from their backing sequences.

use proptest::prelude::*;

use path_engine::engine::level::{next_level, MAX_LEVEL, MIN_LEVEL};
use path_engine::engine::profile;
use path_engine::engine::types::PerformanceProfile;

fn arb_score() -> impl Strategy<Value = f64> {
    0.0..=100.0f64
}

proptest! {
    #[test]
    fn level_stays_in_bounds_for_any_score_sequence(
        scores in proptest::collection::vec(arb_score(), 1..50)
    ) {
        let mut level = MIN_LEVEL;
        for score in scores {
            level = next_level(level, score);
            prop_assert!((MIN_LEVEL..=MAX_LEVEL).contains(&level));
        }
    }

    #[test]
    fn repeated_perfect_scores_saturate_at_max(start in MIN_LEVEL..=MAX_LEVEL) {
        let mut level = start;
        for _ in 0..10 {
            level = next_level(level, 100.0);
        }
        prop_assert_eq!(level, MAX_LEVEL);
    }

    #[test]
    fn repeated_zero_scores_saturate_at_min(start in MIN_LEVEL..=MAX_LEVEL) {
        let mut level = start;
        for _ in 0..10 {
            level = next_level(level, 0.0);
        }
        prop_assert_eq!(level, MIN_LEVEL);
    }

    #[test]
    fn transition_never_moves_more_than_one_level(
        start in MIN_LEVEL..=MAX_LEVEL,
        score in arb_score()
    ) {
        let next = next_level(start, score);
        prop_assert!((next - start).abs() <= 1.0 + 1e-12);
    }

    #[test]
    fn averages_equal_means_of_backing_sequences(
        entries in proptest::collection::vec((arb_score(), 0i64..10_000, 0usize..3), 1..40)
    ) {
        let topic_names = ["algebra", "fractions", "geometry"];
        let mut profile = PerformanceProfile::default();

        for (score, time, topic_idx) in &entries {
            let topics = vec![topic_names[*topic_idx].to_string()];
            profile::apply(&mut profile, *score, *time, &topics);
        }

        let expected_score =
            profile.quiz_scores.iter().sum::<f64>() / profile.quiz_scores.len() as f64;
        prop_assert!((profile.average_score - expected_score).abs() < 1e-9);

        let expected_time = profile.completion_times.iter().sum::<i64>() as f64
            / profile.completion_times.len() as f64;
        prop_assert!((profile.average_completion_time - expected_time).abs() < 1e-9);

        for stats in profile.topics.values() {
            let expected = stats.scores.iter().sum::<f64>() / stats.scores.len() as f64;
            prop_assert!((stats.average_score - expected).abs() < 1e-9);
        }

        prop_assert_eq!(profile.quiz_scores.len(), entries.len());
    }
}
