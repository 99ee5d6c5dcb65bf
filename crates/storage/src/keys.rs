//! Key layout of the persisted records.
//!
//! Two logical records: the section registry under one well-known key, and
//! one question list per section under a key derived from the section id.

use quiz_core::model::SectionId;

/// Key of the singleton `SectionRegistry` record.
pub const SECTIONS_KEY: &str = "sections";

/// Key of the remembered quiz setup defaults.
pub const MAIN_DATA_KEY: &str = "mainData";

/// Key of a section's question list.
#[must_use]
pub fn question_bank_key(section_id: &SectionId) -> String {
    format!("{section_id}_Q")
}
