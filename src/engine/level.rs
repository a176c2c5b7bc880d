//! Level-transition rule: how one quiz score moves a user's
//! difficulty placement. Steps are asymmetric: a full step up only on
//! excellence, half a step down on failure.

pub const MIN_LEVEL: f64 = 1.0;
pub const MAX_LEVEL: f64 = 5.0;

/// Computes the next placement level from a completed-quiz score.
/// Pure and total for scores in [0, 100]; only completed-quiz events
/// ever feed it.
pub fn next_level(current: f64, score: f64) -> f64 {
    if score >= 90.0 {
        (current + 1.0).min(MAX_LEVEL)
    } else if score >= 70.0 {
        (current + 0.5).min(MAX_LEVEL)
    } else if score >= 50.0 {
        current
    } else {
        (current - 0.5).max(MIN_LEVEL)
    }
}
