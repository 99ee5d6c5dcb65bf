use thiserror::Error;

use crate::model::ids::SectionId;

/// Id of the section created when no registry exists yet.
pub const DEFAULT_SECTION_ID: &str = "section0";

/// Display name of the bootstrap section.
pub const DEFAULT_SECTION_NAME: &str = "First Section";

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SectionError {
    #[error("section name cannot be empty")]
    EmptyName,

    #[error("section id {0} already exists")]
    DuplicateId(SectionId),

    #[error("section id {0} does not exist")]
    UnknownSection(SectionId),
}

//
// ─── SECTION ───────────────────────────────────────────────────────────────────
//

/// A named grouping of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    id: SectionId,
    name: String,
}

impl Section {
    /// Creates a new Section.
    ///
    /// # Errors
    ///
    /// Returns `SectionError::EmptyName` if the name is empty or
    /// whitespace-only.
    pub fn new(id: SectionId, name: impl Into<String>) -> Result<Self, SectionError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(SectionError::EmptyName);
        }

        Ok(Self {
            id,
            name: name.to_owned(),
        })
    }

    #[must_use]
    pub fn id(&self) -> &SectionId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

//
// ─── REGISTRY ──────────────────────────────────────────────────────────────────
//

/// The singleton catalog of sections plus the most recently selected one.
///
/// Sections keep insertion order. `last_section`, when set, always
/// references a section present in the catalog; the mutators uphold this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRegistry {
    sections: Vec<Section>,
    last_section: Option<SectionId>,
}

impl SectionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
            last_section: None,
        }
    }

    /// Creates the registry used when none has been persisted yet: one
    /// default section, preselected.
    ///
    /// # Panics
    ///
    /// Never panics; the default name is a valid non-empty literal.
    #[must_use]
    pub fn bootstrap() -> Self {
        let section = Section::new(SectionId::new(DEFAULT_SECTION_ID), DEFAULT_SECTION_NAME)
            .expect("default section literal is valid");
        let last = section.id().clone();
        Self {
            sections: vec![section],
            last_section: Some(last),
        }
    }

    /// Rebuilds a registry from persisted parts, re-checking its invariants.
    ///
    /// # Errors
    ///
    /// Returns `SectionError::DuplicateId` if two sections share an id, and
    /// `SectionError::UnknownSection` if `last_section` references a section
    /// that is not in the list.
    pub fn from_parts(
        sections: Vec<Section>,
        last_section: Option<SectionId>,
    ) -> Result<Self, SectionError> {
        let mut registry = Self::new();
        for section in sections {
            registry.push(section)?;
        }
        if let Some(last) = last_section {
            registry.set_last_section(&last)?;
        }
        Ok(registry)
    }

    /// Appends a section, rejecting duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns `SectionError::DuplicateId` when a section with the same id
    /// is already registered.
    pub fn push(&mut self, section: Section) -> Result<(), SectionError> {
        if self.contains(section.id()) {
            return Err(SectionError::DuplicateId(section.id().clone()));
        }
        self.sections.push(section);
        Ok(())
    }

    /// Marks a section as the most recently selected one.
    ///
    /// Unknown ids are rejected rather than ignored, so `last_section` can
    /// never dangle.
    ///
    /// # Errors
    ///
    /// Returns `SectionError::UnknownSection` when the id is not registered.
    pub fn set_last_section(&mut self, id: &SectionId) -> Result<(), SectionError> {
        if !self.contains(id) {
            return Err(SectionError::UnknownSection(id.clone()));
        }
        self.last_section = Some(id.clone());
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, id: &SectionId) -> bool {
        self.sections.iter().any(|s| s.id() == id)
    }

    #[must_use]
    pub fn get(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id() == id)
    }

    /// Sections in insertion order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn last_section(&self) -> Option<&SectionId> {
        self.last_section.as_ref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl Default for SectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_new_rejects_empty_name() {
        let err = Section::new(SectionId::new("s1"), "   ").unwrap_err();
        assert_eq!(err, SectionError::EmptyName);
    }

    #[test]
    fn section_trims_name() {
        let section = Section::new(SectionId::new("s1"), "  Physics  ").unwrap();
        assert_eq!(section.name(), "Physics");
    }

    #[test]
    fn bootstrap_contains_preselected_default_section() {
        let registry = SectionRegistry::bootstrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.sections()[0].id().as_str(), DEFAULT_SECTION_ID);
        assert_eq!(registry.sections()[0].name(), DEFAULT_SECTION_NAME);
        assert_eq!(
            registry.last_section().map(SectionId::as_str),
            Some(DEFAULT_SECTION_ID)
        );
    }

    #[test]
    fn push_rejects_duplicate_id() {
        let mut registry = SectionRegistry::new();
        registry
            .push(Section::new(SectionId::new("s1"), "One").unwrap())
            .unwrap();

        let err = registry
            .push(Section::new(SectionId::new("s1"), "Other").unwrap())
            .unwrap_err();
        assert_eq!(err, SectionError::DuplicateId(SectionId::new("s1")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn push_keeps_insertion_order() {
        let mut registry = SectionRegistry::new();
        for name in ["A", "B", "C"] {
            registry
                .push(Section::new(SectionId::new(name.to_lowercase()), name).unwrap())
                .unwrap();
        }

        let names: Vec<_> = registry.sections().iter().map(Section::name).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn set_last_section_rejects_unknown_id() {
        let mut registry = SectionRegistry::bootstrap();
        let err = registry
            .set_last_section(&SectionId::new("missing"))
            .unwrap_err();

        assert_eq!(err, SectionError::UnknownSection(SectionId::new("missing")));
        assert_eq!(
            registry.last_section().map(SectionId::as_str),
            Some(DEFAULT_SECTION_ID)
        );
    }

    #[test]
    fn set_last_section_updates_pointer() {
        let mut registry = SectionRegistry::bootstrap();
        registry
            .push(Section::new(SectionId::new("s1"), "One").unwrap())
            .unwrap();

        registry.set_last_section(&SectionId::new("s1")).unwrap();
        assert_eq!(registry.last_section(), Some(&SectionId::new("s1")));
    }

    #[test]
    fn from_parts_rechecks_invariants() {
        let sections = vec![
            Section::new(SectionId::new("s1"), "One").unwrap(),
            Section::new(SectionId::new("s2"), "Two").unwrap(),
        ];

        let ok = SectionRegistry::from_parts(sections.clone(), Some(SectionId::new("s2"))).unwrap();
        assert_eq!(ok.last_section(), Some(&SectionId::new("s2")));

        let err = SectionRegistry::from_parts(sections, Some(SectionId::new("nope"))).unwrap_err();
        assert_eq!(err, SectionError::UnknownSection(SectionId::new("nope")));
    }
}
