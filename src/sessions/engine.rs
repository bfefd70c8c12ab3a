use std::sync::Arc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::distractors::build_options;
use crate::error::QuizError;
use crate::items::ItemBank;
use crate::ledger::{MistakeLedger, MistakeStore};
use crate::selection::{assign_modes, select_items};
use crate::sessions::state::{AnswerFeedback, AnswerOutcome, Phase, Question, Session, SessionState};
use crate::sessions::summary::SessionSummary;

pub const DEFAULT_DISTRACTORS: usize = 3;

/// Drives one quiz at a time over a shared item bank.
///
/// The mistake store is only written from [`QuizEngine::submit_answer`] (on a
/// miss) and [`QuizEngine::reset_history`]. Out-of-order calls are caller bugs:
/// they are logged at error level and rejected with [`QuizError::InvalidState`].
pub struct QuizEngine<S, R = StdRng> {
    bank: Arc<ItemBank>,
    store: S,
    rng: R,
    distractor_count: usize,
    state: SessionState,
    last_start: Option<(usize, f64)>,
}

impl<S: MistakeStore> QuizEngine<S, StdRng> {
    pub fn new(bank: Arc<ItemBank>, store: S) -> Self {
        Self::with_rng(bank, store, StdRng::from_entropy())
    }
}

impl<S: MistakeStore, R: Rng> QuizEngine<S, R> {
    pub fn with_rng(bank: Arc<ItemBank>, store: S, rng: R) -> Self {
        QuizEngine {
            bank,
            store,
            rng,
            distractor_count: DEFAULT_DISTRACTORS,
            state: SessionState::Idle,
            last_start: None,
        }
    }

    pub fn with_distractor_count(mut self, n: usize) -> Self {
        self.distractor_count = n;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn session(&self) -> Option<&Session> {
        self.state.session()
    }

    pub fn is_finished(&self) -> bool {
        self.phase() == Phase::Finished
    }

    pub fn ledger(&self) -> MistakeLedger {
        self.store.get()
    }

    /// Distinct kanji with at least one recorded miss.
    pub fn review_count(&self) -> usize {
        self.store.get().len()
    }

    pub fn summary(&self) -> Option<SessionSummary> {
        self.session().map(SessionSummary::from_session)
    }

    /// Start a new quiz of up to `count` questions, `write_ratio` of them in write mode.
    pub fn start(&mut self, count: usize, write_ratio: f64) -> Result<(), QuizError> {
        if matches!(self.state, SessionState::Active(_)) {
            return Err(self.breach("start"));
        }
        if count == 0 {
            return Err(QuizError::InvalidQuestionCount(count));
        }
        if !(0.0..=1.0).contains(&write_ratio) {
            return Err(QuizError::InvalidRatio(write_ratio));
        }
        if self.bank.is_empty() {
            tracing::error!("Quiz started before the item bank was loaded");
            return Err(QuizError::EmptyBank);
        }

        let ledger = self.store.get();
        let items = select_items(&self.bank, &ledger, count, &mut self.rng);
        let modes = assign_modes(items.len(), write_ratio, &mut self.rng);
        let questions: Vec<Question> = items
            .into_iter()
            .zip(modes)
            .map(|(item, mode)| Question::new(item, mode))
            .collect();

        let mut session = Session::new(questions, count);
        session.options = current_options(&self.bank, &session, self.distractor_count, &mut self.rng);

        tracing::info!(
            requested = count,
            questions = session.total(),
            write_ratio = write_ratio,
            review_items = ledger.len(),
            "Quiz started"
        );

        self.last_start = Some((count, write_ratio));
        self.state = SessionState::Active(session);
        Ok(())
    }

    /// Start again with the parameters of the previous `start`.
    pub fn restart(&mut self) -> Result<(), QuizError> {
        match self.last_start {
            Some((count, write_ratio)) => self.start(count, write_ratio),
            None => Err(self.breach("restart")),
        }
    }

    /// Grade `candidate` against the current question and lock it.
    ///
    /// An empty (or whitespace-only) candidate is rejected with
    /// [`QuizError::EmptyAnswer`] and leaves the question open.
    pub fn submit_answer(&mut self, candidate: &str) -> Result<AnswerFeedback, QuizError> {
        if self.phase() != Phase::Unanswered {
            return Err(self.breach("submit_answer"));
        }
        let given = candidate.trim();
        if given.is_empty() {
            tracing::debug!("Empty answer submitted");
            return Err(QuizError::EmptyAnswer);
        }

        let SessionState::Active(session) = &mut self.state else {
            return Err(QuizError::InvalidState { operation: "submit_answer", state: "idle" });
        };

        let index = session.index;
        let question = &mut session.questions[index];
        let expected = question.expected_answer();
        let correct = given == expected;
        question.outcome = Some(AnswerOutcome { given: given.to_string(), correct });
        let kanji = question.item.identity.clone();
        let mode = question.mode;

        session.locked = true;
        let mistake_count = if correct {
            session.score += 1;
            self.store.get().count(&kanji)
        } else {
            session.record_miss(&kanji);
            record_mistake(&self.store, &kanji)
        };

        tracing::debug!(
            kanji = %kanji,
            mode = %mode,
            correct = correct,
            score = session.score,
            "Answer graded"
        );

        Ok(AnswerFeedback {
            kanji,
            mode,
            given: given.to_string(),
            expected,
            correct,
            mistake_count,
        })
    }

    /// Move past a locked question; finishes the quiz after the last one.
    pub fn advance(&mut self) -> Result<Phase, QuizError> {
        if self.phase() != Phase::Locked {
            return Err(self.breach("advance"));
        }

        let finished = match &mut self.state {
            SessionState::Active(session) => {
                session.index += 1;
                if session.index >= session.questions.len() {
                    true
                } else {
                    session.locked = false;
                    session.options =
                        current_options(&self.bank, session, self.distractor_count, &mut self.rng);
                    false
                }
            }
            _ => false,
        };

        if finished {
            self.finish("completed");
        }
        Ok(self.phase())
    }

    /// End the quiz now; the summary only counts answered questions.
    pub fn abandon(&mut self) -> Result<SessionSummary, QuizError> {
        match self.phase() {
            Phase::Idle => return Err(self.breach("abandon")),
            Phase::Unanswered | Phase::Locked => self.finish("abandoned"),
            Phase::Finished => {}
        }
        self.summary().ok_or_else(|| self.breach("abandon"))
    }

    /// Forget every recorded mistake. Safe to call in any phase.
    pub fn reset_history(&self) -> Result<(), QuizError> {
        self.store.clear()?;
        tracing::info!("Mistake history cleared");
        Ok(())
    }

    fn finish(&mut self, reason: &'static str) {
        let state = std::mem::replace(&mut self.state, SessionState::Idle);
        self.state = match state {
            SessionState::Active(mut session) => {
                session.locked = false;
                session.finished_at = Some(chrono::Utc::now());
                tracing::info!(
                    reason = reason,
                    score = session.score,
                    answered = session.answered(),
                    total = session.total(),
                    missed = ?session.missed,
                    "Quiz finished"
                );
                SessionState::Finished(session)
            }
            other => other,
        };
    }

    fn breach(&self, operation: &'static str) -> QuizError {
        let state = self.phase().name();
        tracing::error!(operation = operation, state = state, "Quiz operation called out of order");
        QuizError::InvalidState { operation, state }
    }
}

fn current_options<R: Rng + ?Sized>(
    bank: &ItemBank,
    session: &Session,
    distractors: usize,
    rng: &mut R,
) -> Vec<String> {
    match session.current_question() {
        Some(q) => build_options(bank, &q.item, q.mode, distractors, rng),
        None => Vec::new(),
    }
}

/// Read-modify-write of one ledger entry, persisted immediately.
/// A failed write is logged; the graded answer stands.
fn record_mistake<S: MistakeStore>(store: &S, kanji: &str) -> u32 {
    let mut ledger = store.get();
    let count = ledger.increment(kanji);
    if let Err(e) = store.set(&ledger) {
        tracing::warn!(kanji = %kanji, error = %e, "Failed to persist mistake ledger");
    }
    count
}
