mod catalog;
mod paths;
mod profiles;

pub use catalog::{get_all_lessons, get_all_quizzes, get_content_item};
pub use paths::{get_path_state, upsert_path_state};
pub use profiles::{get_profile, upsert_profile};
