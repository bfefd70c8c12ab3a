use thiserror::Error;

/// Unified error type for the quiz engine.
/// Insufficient pools are never errors; they shrink the result instead.
#[derive(Error, Debug)]
pub enum QuizError {
    #[error("No answer given; choose or type an answer first")]
    EmptyAnswer,

    #[error("Question count must be at least 1 (got {0})")]
    InvalidQuestionCount(usize),

    #[error("Write ratio must be within 0.0..=1.0 (got {0})")]
    InvalidRatio(f64),

    #[error("`{operation}` is not valid while the session is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    #[error("Item bank is empty; load it before starting a quiz")]
    EmptyBank,

    #[error("Item `{0}` has no readings")]
    InvalidItem(String),

    #[error("Item `{0}` appears more than once in the bank")]
    DuplicateItem(String),

    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl QuizError {
    /// True when the caller should simply prompt the user again.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            QuizError::EmptyAnswer
                | QuizError::InvalidQuestionCount(_)
                | QuizError::InvalidRatio(_)
        )
    }

    /// True for caller contract breaches (out-of-order calls, missing bank).
    pub fn is_precondition_violation(&self) -> bool {
        matches!(self, QuizError::InvalidState { .. } | QuizError::EmptyBank)
    }
}

impl From<std::io::Error> for QuizError {
    fn from(error: std::io::Error) -> Self {
        QuizError::Io(Box::new(error))
    }
}
