use std::sync::Arc;

use quiz_core::Clock;
use storage::repository::Store;

use crate::error::AppServicesError;
use crate::question_service::QuestionService;
use crate::quiz::QuizLoopService;
use crate::section_service::SectionService;

/// Assembles the app-facing services over one storage backend and runs the
/// registry bootstrap so callers always observe a valid registry.
#[derive(Clone)]
pub struct AppServices {
    sections: Arc<SectionService>,
    questions: Arc<QuestionService>,
    quiz: Arc<QuizLoopService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or the registry
    /// bootstrap fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let store = Store::sqlite(db_url).await?;
        Self::assemble(store, clock).await
    }

    /// Build services over an in-memory store, for tests and prototyping.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the registry bootstrap fails.
    pub async fn in_memory(clock: Clock) -> Result<Self, AppServicesError> {
        Self::assemble(Store::in_memory(), clock).await
    }

    async fn assemble(store: Store, clock: Clock) -> Result<Self, AppServicesError> {
        let sections = Arc::new(SectionService::new(store.registry.clone()));
        let questions = Arc::new(QuestionService::new(store.questions.clone()));
        let quiz = Arc::new(QuizLoopService::new(
            clock,
            store.questions.clone(),
            store.defaults.clone(),
        ));

        sections.load().await?;

        Ok(Self {
            sections,
            questions,
            quiz,
        })
    }

    #[must_use]
    pub fn sections(&self) -> &SectionService {
        &self.sections
    }

    #[must_use]
    pub fn questions(&self) -> &QuestionService {
        &self.questions
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizLoopService {
        &self.quiz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use quiz_core::model::DEFAULT_SECTION_ID;
    use quiz_core::time::fixed_clock;

    #[tokio::test]
    async fn assembly_bootstraps_the_registry() {
        let services = AppServices::in_memory(fixed_clock()).await.unwrap();

        let registry = services.sections().load().await.unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.sections()[0].id().as_str(), DEFAULT_SECTION_ID);
    }
}
