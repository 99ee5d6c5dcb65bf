use std::sync::Arc;

use rand::thread_rng;
use tracing::info;

use quiz_core::Clock;
use quiz_core::model::{Question, QuizDefaults};
use storage::repository::{QuestionBankRepository, QuizDefaultsRepository};

use super::session::QuizSession;
use super::setup::{DEFAULT_TIME_LIMIT_SECS, QuizSetup};
use crate::error::QuizError;

/// Orchestrates quiz starts: setup validation, question loading, sampling,
/// and the remembered setup defaults.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    questions: Arc<dyn QuestionBankRepository>,
    defaults: Arc<dyn QuizDefaultsRepository>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        questions: Arc<dyn QuestionBankRepository>,
        defaults: Arc<dyn QuizDefaultsRepository>,
    ) -> Self {
        Self {
            clock,
            questions,
            defaults,
        }
    }

    /// A fresh setup form, prefilled with the remembered question count.
    ///
    /// The section selection always starts empty; the setup screen prompts
    /// every time.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` if the defaults record cannot be read.
    pub async fn default_setup(&self) -> Result<QuizSetup, QuizError> {
        let defaults = self.defaults.load_defaults().await?.unwrap_or_default();
        Ok(QuizSetup::new(
            Vec::new(),
            defaults.last_question_count,
            DEFAULT_TIME_LIMIT_SECS,
        ))
    }

    /// Validate the setup and start a session over the union of questions
    /// from the selected sections.
    ///
    /// The requested count is remembered for the next setup screen.
    ///
    /// # Errors
    ///
    /// Returns the setup's validation error with no state change,
    /// `QuizError::NoQuestionsAvailable` when the selected sections hold no
    /// questions, or `QuizError::Storage` for read/write failures.
    pub async fn start_quiz(&self, setup: &QuizSetup) -> Result<QuizSession, QuizError> {
        setup.validate()?;

        let mut pool = Vec::new();
        for id in setup.selected() {
            pool.extend(self.questions.load_questions(id).await?);
        }
        if pool.is_empty() {
            return Err(QuizError::NoQuestionsAvailable);
        }

        let mut rng = thread_rng();
        let session = QuizSession::start(setup.clone(), pool, &mut rng, self.clock.now())?;

        self.defaults
            .save_defaults(&QuizDefaults {
                last_question_count: setup.requested_count(),
            })
            .await?;

        info!(
            questions = session.total(),
            time_limit_secs = setup.time_limit_secs(),
            "quiz started"
        );
        Ok(session)
    }

    /// Load the union of questions for the given setup without starting a
    /// session, for setup-screen gating.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` if any bank cannot be read.
    pub async fn available_questions(&self, setup: &QuizSetup) -> Result<Vec<Question>, QuizError> {
        let mut pool = Vec::new();
        for id in setup.selected() {
            pool.extend(self.questions.load_questions(id).await?);
        }
        Ok(pool)
    }
}
