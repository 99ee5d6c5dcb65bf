use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;

use quiz_core::model::{Question, SectionId};

use super::setup::QuizSetup;
use crate::error::QuizError;

//
// ─── PHASE & ANSWERS ───────────────────────────────────────────────────────────
//

/// Lifecycle phase of a running session. The Setup phase that precedes a
/// session is [`QuizSetup`]; a `QuizSession` exists only once the setup
/// gate has passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    InProgress,
    Finished,
}

/// Recorded choice for one question slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AnswerSlot {
    #[default]
    Unanswered,
    Answered(usize),
}

impl AnswerSlot {
    #[must_use]
    pub fn chosen(&self) -> Option<usize> {
        match self {
            AnswerSlot::Unanswered => None,
            AnswerSlot::Answered(option) => Some(*option),
        }
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        matches!(self, AnswerSlot::Answered(_))
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One timed attempt at a sampled subset of questions.
///
/// Held only in memory; never persisted. The sampled questions are fixed
/// for the session's duration, answers mutate only while in progress, and
/// the score is computed exactly once, at submission or timer expiry.
#[derive(Debug)]
pub struct QuizSession {
    setup: QuizSetup,
    questions: Vec<Question>,
    answers: Vec<AnswerSlot>,
    remaining_secs: u32,
    phase: QuizPhase,
    score: u32,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Start a session from a validated setup and the pooled questions of
    /// the selected sections.
    ///
    /// The pool is shuffled with an unbiased Fisher-Yates pass and cut to
    /// `min(requested, available)`. Answers start empty, the score at zero,
    /// and the countdown at the configured time limit.
    ///
    /// # Errors
    ///
    /// Returns the setup's validation error, or
    /// `QuizError::NoQuestionsAvailable` when the pool is empty.
    pub fn start<R: Rng + ?Sized>(
        setup: QuizSetup,
        pool: Vec<Question>,
        rng: &mut R,
        started_at: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        setup.validate()?;
        if pool.is_empty() {
            return Err(QuizError::NoQuestionsAvailable);
        }

        let requested = usize::try_from(setup.requested_count()).unwrap_or(usize::MAX);
        let questions = sample_questions(pool, requested, rng);
        let answers = vec![AnswerSlot::Unanswered; questions.len()];
        let remaining_secs = setup.time_limit_secs();

        Ok(Self {
            setup,
            questions,
            answers,
            remaining_secs,
            phase: QuizPhase::InProgress,
            score: 0,
            started_at,
            finished_at: None,
        })
    }

    /// Record a choice for a question, overwriting any prior one.
    ///
    /// Only valid while in progress with in-range indices; violations are
    /// logic errors, asserted in debug builds and ignored in release.
    pub fn select_answer(&mut self, question: usize, option: usize) {
        if self.phase != QuizPhase::InProgress {
            debug_assert!(false, "answer selected outside an in-progress session");
            return;
        }
        let Some(q) = self.questions.get(question) else {
            debug_assert!(false, "question index out of range");
            return;
        };
        if option >= q.options().len() {
            debug_assert!(false, "option index out of range");
            return;
        }
        self.answers[question] = AnswerSlot::Answered(option);
    }

    /// Advance the countdown by one second; at zero the session finishes
    /// with whatever answers are recorded.
    ///
    /// A no-op outside InProgress, so a racing timer callback can never
    /// mutate a finished session. Returns the phase after the tick.
    pub fn tick(&mut self, now: DateTime<Utc>) -> QuizPhase {
        if self.phase != QuizPhase::InProgress {
            return self.phase;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.finish(now);
        }
        self.phase
    }

    /// Finish the session explicitly, computing the score.
    ///
    /// Submitting a session that is not in progress is a logic error:
    /// asserted in debug builds, ignored in release.
    pub fn submit(&mut self, now: DateTime<Utc>) {
        if self.phase != QuizPhase::InProgress {
            debug_assert!(false, "submit outside an in-progress session");
            return;
        }
        self.finish(now);
    }

    fn finish(&mut self, now: DateTime<Utc>) {
        let correct = self
            .questions
            .iter()
            .zip(&self.answers)
            .filter(|(question, answer)| answer.chosen() == Some(question.correct_answer()))
            .count();
        self.score = u32::try_from(correct).unwrap_or(u32::MAX);
        self.phase = QuizPhase::Finished;
        self.finished_at = Some(now);
    }

    /// Setup for a fresh attempt, preserving the section selection, count,
    /// and time limit. The session itself is discarded by the caller, so
    /// nothing of its answers or score can leak into the next run.
    #[must_use]
    pub fn restart_setup(&self) -> QuizSetup {
        self.setup.clone()
    }

    // Accessors

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    /// The sampled questions, fixed for the session's duration.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerSlot] {
        &self.answers
    }

    #[must_use]
    pub fn answer(&self, question: usize) -> AnswerSlot {
        self.answers
            .get(question)
            .copied()
            .unwrap_or(AnswerSlot::Unanswered)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_answered()).count()
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Final score; zero until the session finishes.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn selected_sections(&self) -> &[SectionId] {
        self.setup.selected()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }
}

/// Unbiased sample: Fisher-Yates shuffle, then cut to `requested`.
fn sample_questions<R: Rng + ?Sized>(
    mut pool: Vec<Question>,
    requested: usize,
    rng: &mut R,
) -> Vec<Question> {
    pool.shuffle(rng);
    pool.truncate(requested);
    pool
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
