pub mod quiz;

pub use quiz::{get_quiz_config, load_quiz_config, QuizConfig};
