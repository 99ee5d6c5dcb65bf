#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod question_service;
pub mod quiz;
pub mod section_service;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, QuestionServiceError, QuizError, SectionServiceError};
pub use question_service::{QuestionDraft, QuestionService};
pub use quiz::{
    AnswerSlot, DEFAULT_QUESTION_COUNT, DEFAULT_TIME_LIMIT_SECS, OptionMark, QUESTIONS_PER_PAGE,
    QuestionReview, QuizCountdown, QuizLoopService, QuizPager, QuizPhase, QuizReview, QuizSession,
    QuizSetup,
};
pub use section_service::SectionService;
