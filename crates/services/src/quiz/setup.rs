use quiz_core::model::SectionId;

use crate::error::QuizError;

/// Question count prefilled when no defaults have been remembered yet.
pub const DEFAULT_QUESTION_COUNT: u32 = 5;

/// Time limit prefilled into a fresh setup form.
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 60;

/// Form state of the Setup phase.
///
/// Collects the section selection, requested question count, and time
/// limit. `validate` gates the transition into a running session; a failed
/// validation changes nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSetup {
    selected: Vec<SectionId>,
    requested_count: u32,
    time_limit_secs: u32,
}

impl QuizSetup {
    /// Creates a setup with an explicit selection. Duplicate ids collapse to
    /// their first occurrence, keeping selection order.
    #[must_use]
    pub fn new(selected: Vec<SectionId>, requested_count: u32, time_limit_secs: u32) -> Self {
        let mut setup = Self {
            selected: Vec::new(),
            requested_count,
            time_limit_secs,
        };
        for id in selected {
            setup.select_section(id);
        }
        setup
    }

    /// Selects a section; already-selected ids are ignored.
    pub fn select_section(&mut self, id: SectionId) {
        if !self.is_selected(&id) {
            self.selected.push(id);
        }
    }

    /// Selects the section if unselected, deselects it otherwise.
    pub fn toggle_section(&mut self, id: &SectionId) {
        if self.is_selected(id) {
            self.selected.retain(|s| s != id);
        } else {
            self.selected.push(id.clone());
        }
    }

    #[must_use]
    pub fn is_selected(&self, id: &SectionId) -> bool {
        self.selected.contains(id)
    }

    /// Selected section ids in selection order.
    #[must_use]
    pub fn selected(&self) -> &[SectionId] {
        &self.selected
    }

    #[must_use]
    pub fn requested_count(&self) -> u32 {
        self.requested_count
    }

    pub fn set_requested_count(&mut self, count: u32) {
        self.requested_count = count;
    }

    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    pub fn set_time_limit_secs(&mut self, secs: u32) {
        self.time_limit_secs = secs;
    }

    /// Checks the Setup-to-InProgress gate: at least one section, positive
    /// count, positive time limit.
    ///
    /// # Errors
    ///
    /// Returns the first violated `QuizError` validation variant.
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.selected.is_empty() {
            return Err(QuizError::NoSectionsSelected);
        }
        if self.requested_count == 0 {
            return Err(QuizError::InvalidQuestionCount);
        }
        if self.time_limit_secs == 0 {
            return Err(QuizError::InvalidTimeLimit);
        }
        Ok(())
    }
}

impl Default for QuizSetup {
    fn default() -> Self {
        Self {
            selected: Vec::new(),
            requested_count: DEFAULT_QUESTION_COUNT,
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
        }
    }
}
