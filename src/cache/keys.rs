use std::time::Duration;

// Path responses stay cached for ten minutes.
pub const LEARNING_PATH_TTL: Duration = Duration::from_secs(10 * 60);

pub fn learning_path_key(user_id: &str) -> String {
    format!("learning_path:{}", user_id)
}
