use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::distractors::correct_answer;
use crate::items::Item;
use crate::selection::QuestionMode;

/// What happened when a question was answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub given: String,
    pub correct: bool,
}

/// One selected item paired with its presentation mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub item: Item,
    pub mode: QuestionMode,
    pub outcome: Option<AnswerOutcome>,
}

impl Question {
    pub fn new(item: Item, mode: QuestionMode) -> Self {
        Question { item, mode, outcome: None }
    }

    pub fn expected_answer(&self) -> String {
        correct_answer(&self.item, self.mode)
    }

    /// Example sentence shown with the question.
    pub fn context(&self) -> &str {
        match self.mode {
            QuestionMode::Read => &self.item.prompt_text,
            QuestionMode::Write => &self.item.write_context,
        }
    }

    /// Reading shown to the user in write mode (hint first).
    pub fn display_reading(&self) -> Option<String> {
        match self.mode {
            QuestionMode::Read => None,
            QuestionMode::Write => Some(self.item.primary_reading()),
        }
    }
}

/// Result of a submission, for the presentation layer to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub kanji: String,
    pub mode: QuestionMode,
    pub given: String,
    pub expected: String,
    pub correct: bool,
    /// Ledger count after this answer; unchanged on a correct answer.
    pub mistake_count: u32,
}

/// Run-time state of one quiz.
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) questions: Vec<Question>,
    pub(crate) index: usize,
    pub(crate) score: usize,
    pub(crate) missed: Vec<String>,
    pub(crate) locked: bool,
    pub(crate) options: Vec<String>,
    pub(crate) requested: usize,
    pub(crate) started_at: DateTime<Utc>,
    pub(crate) finished_at: Option<DateTime<Utc>>,
}

impl Session {
    pub(crate) fn new(questions: Vec<Question>, requested: usize) -> Self {
        Session {
            questions,
            index: 0,
            score: 0,
            missed: Vec::new(),
            locked: false,
            options: Vec::new(),
            requested,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    /// Answer choices for the current question.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Zero-based position of the current question.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Question count asked for at start; `total()` may be smaller.
    pub fn requested(&self) -> usize {
        self.requested
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// Missed kanji, deduplicated, in the order they were first missed.
    pub fn missed(&self) -> &[String] {
        &self.missed
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn answered(&self) -> usize {
        self.questions.iter().filter(|q| q.outcome.is_some()).count()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    pub(crate) fn record_miss(&mut self, kanji: &str) {
        if !self.missed.iter().any(|k| k == kanji) {
            self.missed.push(kanji.to_string());
        }
    }
}

/// Session lifecycle: `Idle -> Active -> Finished`.
#[derive(Debug, Clone)]
pub enum SessionState {
    Idle,
    Active(Session),
    Finished(Session),
}

/// Data-free view of [`SessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Unanswered,
    Locked,
    Finished,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Unanswered => "unanswered",
            Phase::Locked => "locked",
            Phase::Finished => "finished",
        }
    }
}

impl SessionState {
    pub fn phase(&self) -> Phase {
        match self {
            SessionState::Idle => Phase::Idle,
            SessionState::Active(s) if s.locked => Phase::Locked,
            SessionState::Active(_) => Phase::Unanswered,
            SessionState::Finished(_) => Phase::Finished,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Idle => None,
            SessionState::Active(s) | SessionState::Finished(s) => Some(s),
        }
    }
}
