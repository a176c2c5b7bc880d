//! Performance-profile updater. One completed quiz appends to the
//! global score/time sequences and to every tagged topic's sequence,
//! then recomputes the averages from scratch so they never drift from
//! their backing data.

use crate::engine::types::{PerformanceProfile, TopicStats};

pub fn apply(profile: &mut PerformanceProfile, score: f64, time_spent_secs: i64, topics: &[String]) {
    profile.quiz_scores.push(score);
    profile.average_score = mean(&profile.quiz_scores);

    profile.completion_times.push(time_spent_secs);
    profile.average_completion_time = mean_i64(&profile.completion_times);

    for topic in topics {
        let stats = profile
            .topics
            .entry(topic.clone())
            .or_insert_with(TopicStats::default);
        stats.scores.push(score);
        stats.average_score = mean(&stats.scores);
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn mean_i64(values: &[i64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<i64>() as f64 / values.len() as f64
}
