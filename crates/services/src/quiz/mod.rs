mod countdown;
mod pager;
mod review;
mod session;
mod setup;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use countdown::QuizCountdown;
pub use pager::{QUESTIONS_PER_PAGE, QuizPager};
pub use review::{OptionMark, QuestionReview, QuizReview};
pub use session::{AnswerSlot, QuizPhase, QuizSession};
pub use setup::{DEFAULT_QUESTION_COUNT, DEFAULT_TIME_LIMIT_SECS, QuizSetup};
pub use workflow::QuizLoopService;
