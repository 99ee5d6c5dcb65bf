use quiz_core::model::Question;

use super::session::{QuizPhase, QuizSession};

/// How a single option should be rendered on the results screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionMark {
    /// The user picked this option and it is the correct one.
    SelectedCorrect,
    /// The correct option the user did not pick.
    CorrectNotSelected,
    /// The user picked this option and it is wrong.
    SelectedIncorrect,
    /// Neither picked nor correct.
    Neutral,
}

/// One reviewed question: the question itself, the user's choice, and a
/// mark per option in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionReview {
    pub question: Question,
    pub chosen: Option<usize>,
    pub marks: Vec<OptionMark>,
}

impl QuestionReview {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.chosen == Some(self.question.correct_answer())
    }
}

/// Read-only view of a finished session's answers against the correct ones.
///
/// Pure function of the session; building it mutates nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizReview {
    pub score: u32,
    pub total: usize,
    pub questions: Vec<QuestionReview>,
}

impl QuizReview {
    /// Build the review for a finished session; `None` while the session is
    /// still in progress.
    #[must_use]
    pub fn of(session: &QuizSession) -> Option<Self> {
        if session.phase() != QuizPhase::Finished {
            return None;
        }

        let questions = session
            .questions()
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let chosen = session.answer(index).chosen();
                let marks = (0..question.options().len())
                    .map(|option| mark_option(question, chosen, option))
                    .collect();
                QuestionReview {
                    question: question.clone(),
                    chosen,
                    marks,
                }
            })
            .collect();

        Some(Self {
            score: session.score(),
            total: session.total(),
            questions,
        })
    }
}

fn mark_option(question: &Question, chosen: Option<usize>, option: usize) -> OptionMark {
    let selected = chosen == Some(option);
    match (selected, question.is_correct(option)) {
        (true, true) => OptionMark::SelectedCorrect,
        (false, true) => OptionMark::CorrectNotSelected,
        (true, false) => OptionMark::SelectedIncorrect,
        (false, false) => OptionMark::Neutral,
    }
}
