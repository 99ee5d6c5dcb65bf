use std::sync::Arc;

use quiz_core::model::{Question, SectionId};
use storage::repository::QuestionBankRepository;

use crate::error::QuestionServiceError;

/// Unvalidated authoring-form input for a question.
#[derive(Debug, Clone, Default)]
pub struct QuestionDraft {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
}

impl QuestionDraft {
    #[must_use]
    pub fn new(text: impl Into<String>, options: Vec<String>, correct_answer: usize) -> Self {
        Self {
            text: text.into(),
            options,
            correct_answer,
        }
    }
}

/// Orchestrates question authoring and per-section bank persistence.
#[derive(Clone)]
pub struct QuestionService {
    questions: Arc<dyn QuestionBankRepository>,
}

impl QuestionService {
    #[must_use]
    pub fn new(questions: Arc<dyn QuestionBankRepository>) -> Self {
        Self { questions }
    }

    /// Validate a draft and append it to the section's bank.
    ///
    /// The bank is a whole-record read-modify-write; there is no partial
    /// append, which is acceptable at this scale.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Question` for validation failures and
    /// `QuestionServiceError::Storage` if the bank cannot be read or
    /// written. A failed write leaves the stored bank unchanged.
    pub async fn add_question(
        &self,
        section_id: &SectionId,
        draft: QuestionDraft,
    ) -> Result<Question, QuestionServiceError> {
        let question = Question::new(draft.text, draft.options, draft.correct_answer)?;

        let mut bank = self.questions.load_questions(section_id).await?;
        bank.push(question.clone());
        self.questions.save_questions(section_id, &bank).await?;
        Ok(question)
    }

    /// Load the questions of the given sections, concatenated in the
    /// iteration order of `section_ids`; within a section, insertion order.
    /// Sections without a stored bank contribute nothing.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if any bank cannot be read.
    pub async fn load_questions(
        &self,
        section_ids: &[SectionId],
    ) -> Result<Vec<Question>, QuestionServiceError> {
        let mut all = Vec::new();
        for id in section_ids {
            all.extend(self.questions.load_questions(id).await?);
        }
        Ok(all)
    }

    /// Number of questions available across the given sections.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if any bank cannot be read.
    pub async fn count_questions(
        &self,
        section_ids: &[SectionId],
    ) -> Result<usize, QuestionServiceError> {
        let questions = self.load_questions(section_ids).await?;
        Ok(questions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use quiz_core::model::QuestionError;
    use storage::repository::Store;

    fn draft(text: &str, correct: usize) -> QuestionDraft {
        QuestionDraft::new(
            text,
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct,
        )
    }

    #[tokio::test]
    async fn add_question_appends_in_order() {
        let store = Store::in_memory();
        let service = QuestionService::new(store.questions.clone());
        let section = SectionId::new("s1");

        service.add_question(&section, draft("Q1", 0)).await.unwrap();
        service.add_question(&section, draft("Q2", 1)).await.unwrap();

        let bank = store.questions.load_questions(&section).await.unwrap();
        let texts: Vec<_> = bank.iter().map(Question::text).collect();
        assert_eq!(texts, ["Q1", "Q2"]);
    }

    #[tokio::test]
    async fn add_question_rejects_invalid_draft_and_keeps_bank() {
        let store = Store::in_memory();
        let service = QuestionService::new(store.questions.clone());
        let section = SectionId::new("s1");
        service.add_question(&section, draft("Q1", 0)).await.unwrap();

        let err = service
            .add_question(&section, draft("  ", 0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            QuestionServiceError::Question(QuestionError::EmptyText)
        ));

        let err = service
            .add_question(&section, draft("Q2", 9))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            QuestionServiceError::Question(QuestionError::CorrectAnswerOutOfRange { .. })
        ));

        let bank = store.questions.load_questions(&section).await.unwrap();
        assert_eq!(bank.len(), 1);
    }

    #[tokio::test]
    async fn load_questions_concatenates_in_given_order() {
        let store = Store::in_memory();
        let service = QuestionService::new(store.questions.clone());
        let a = SectionId::new("a");
        let b = SectionId::new("b");

        service.add_question(&a, draft("A1", 0)).await.unwrap();
        service.add_question(&a, draft("A2", 0)).await.unwrap();
        service.add_question(&b, draft("B1", 0)).await.unwrap();

        let merged = service.load_questions(&[b.clone(), a.clone()]).await.unwrap();
        let texts: Vec<_> = merged.iter().map(Question::text).collect();
        assert_eq!(texts, ["B1", "A1", "A2"]);
    }

    #[tokio::test]
    async fn load_questions_skips_absent_banks() {
        let store = Store::in_memory();
        let service = QuestionService::new(store.questions.clone());
        let a = SectionId::new("a");
        service.add_question(&a, draft("A1", 0)).await.unwrap();

        let merged = service
            .load_questions(&[a, SectionId::new("empty")])
            .await
            .unwrap();
        assert_eq!(merged.len(), 1);
    }

    #[tokio::test]
    async fn count_questions_sums_across_sections() {
        let store = Store::in_memory();
        let service = QuestionService::new(store.questions.clone());
        let a = SectionId::new("a");
        let b = SectionId::new("b");

        service.add_question(&a, draft("A1", 0)).await.unwrap();
        service.add_question(&b, draft("B1", 0)).await.unwrap();
        service.add_question(&b, draft("B2", 0)).await.unwrap();

        let count = service.count_questions(&[a, b]).await.unwrap();
        assert_eq!(count, 3);
    }
}
