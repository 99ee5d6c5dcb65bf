mod defaults;
mod ids;
mod question;
mod section;

pub use defaults::QuizDefaults;
pub use ids::SectionId;
pub use question::{OPTION_COUNT, Question, QuestionError};
pub use section::{
    DEFAULT_SECTION_ID, DEFAULT_SECTION_NAME, Section, SectionError, SectionRegistry,
};
