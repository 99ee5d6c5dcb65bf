//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{QuestionError, SectionError};
use storage::kv::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `SectionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SectionServiceError {
    #[error(transparent)]
    Section(#[from] SectionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuestionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionServiceError {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the quiz session services.
///
/// The validation variants carry the user-facing message shown when the
/// Setup-to-InProgress transition is refused; nothing changes state.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("select at least one section")]
    NoSectionsSelected,
    #[error("question count must be greater than zero")]
    InvalidQuestionCount,
    #[error("time limit must be greater than zero")]
    InvalidTimeLimit,
    #[error("no questions available in the selected sections")]
    NoQuestionsAvailable,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Section(#[from] SectionServiceError),
}
