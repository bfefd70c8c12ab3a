use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::sessions::state::Session;

/// End-of-quiz result shown on the results screen.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub total: usize,
    pub answered: usize,
    pub score: usize,
    pub missed: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl SessionSummary {
    pub fn from_session(session: &Session) -> Self {
        SessionSummary {
            total: session.total(),
            answered: session.answered(),
            score: session.score(),
            missed: session.missed().to_vec(),
            started_at: session.started_at(),
            finished_at: session.finished_at(),
        }
    }

    pub fn is_perfect(&self) -> bool {
        self.answered == self.total && self.score == self.total
    }
}
