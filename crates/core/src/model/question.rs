use thiserror::Error;

/// Number of answer options every question carries.
pub const OPTION_COUNT: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("option {0} cannot be empty")]
    EmptyOption(usize),

    #[error("expected {OPTION_COUNT} options, got {0}")]
    WrongOptionCount(usize),

    #[error("correct answer index {index} is out of range for {len} options")]
    CorrectAnswerOutOfRange { index: usize, len: usize },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question with exactly one correct option.
///
/// Validation happens here, at creation time only; everything downstream
/// (banks, sessions, review) may rely on the invariants without re-checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    options: Vec<String>,
    correct_answer: usize,
}

impl Question {
    /// Creates a validated question.
    ///
    /// Text and options are trimmed. Invariants: non-empty text, exactly
    /// [`OPTION_COUNT`] non-empty options, `correct_answer < options.len()`.
    ///
    /// # Errors
    ///
    /// Returns a `QuestionError` describing the first violated invariant.
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_answer: usize,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        let text = text.trim();
        if text.is_empty() {
            return Err(QuestionError::EmptyText);
        }

        if options.len() != OPTION_COUNT {
            return Err(QuestionError::WrongOptionCount(options.len()));
        }

        let mut trimmed = Vec::with_capacity(options.len());
        for (index, option) in options.iter().enumerate() {
            let option = option.trim();
            if option.is_empty() {
                return Err(QuestionError::EmptyOption(index));
            }
            trimmed.push(option.to_owned());
        }

        if correct_answer >= trimmed.len() {
            return Err(QuestionError::CorrectAnswerOutOfRange {
                index: correct_answer,
                len: trimmed.len(),
            });
        }

        Ok(Self {
            text: text.to_owned(),
            options: trimmed,
            correct_answer,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Options in display order.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> usize {
        self.correct_answer
    }

    /// True when the given option index is the correct one.
    #[must_use]
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_answer
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
