pub mod engine;
pub mod state;
pub mod summary;

pub use engine::QuizEngine;
pub use state::{AnswerFeedback, AnswerOutcome, Phase, Question, Session, SessionState};
pub use summary::SessionSummary;
