use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use quiz_core::model::{Question, QuizDefaults, Section, SectionId, SectionRegistry};

use crate::keys::{MAIN_DATA_KEY, SECTIONS_KEY, question_bank_key};
use crate::kv::{InMemoryStore, KeyValueStore, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

//
// ─── PERSISTED RECORDS ─────────────────────────────────────────────────────────
//

/// Persisted shape of a section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionRecord {
    pub id: String,
    pub name: String,
}

/// Persisted shape of the section registry, stored under the `"sections"`
/// key. Field names follow the historical JSON layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRegistryRecord {
    pub sections: Vec<SectionRecord>,
    pub last_section: Option<String>,
}

impl SectionRegistryRecord {
    #[must_use]
    pub fn from_registry(registry: &SectionRegistry) -> Self {
        Self {
            sections: registry
                .sections()
                .iter()
                .map(|section| SectionRecord {
                    id: section.id().as_str().to_owned(),
                    name: section.name().to_owned(),
                })
                .collect(),
            last_section: registry
                .last_section()
                .map(|id| id.as_str().to_owned()),
        }
    }

    /// Convert the record back into a domain registry, re-running the
    /// domain invariants.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` when the persisted data no
    /// longer satisfies them.
    pub fn into_registry(self) -> Result<SectionRegistry, StorageError> {
        let mut sections = Vec::with_capacity(self.sections.len());
        for record in self.sections {
            sections.push(Section::new(SectionId::new(record.id), record.name).map_err(ser)?);
        }
        let last = self.last_section.map(SectionId::new);
        SectionRegistry::from_parts(sections, last).map_err(ser)
    }
}

/// Persisted shape of a question, one array of these per section under the
/// `"<sectionId>_Q"` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            question: question.text().to_owned(),
            options: question.options().to_vec(),
            correct_answer: question.correct_answer(),
        }
    }

    /// Convert the record back into a domain question.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` when the persisted data fails
    /// domain validation.
    pub fn into_question(self) -> Result<Question, StorageError> {
        Question::new(self.question, self.options, self.correct_answer).map_err(ser)
    }
}

/// Persisted quiz setup defaults, stored under the `"mainData"` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDefaultsRecord {
    pub last_question_count: u32,
}

impl QuizDefaultsRecord {
    #[must_use]
    pub fn from_defaults(defaults: &QuizDefaults) -> Self {
        Self {
            last_question_count: defaults.last_question_count,
        }
    }

    #[must_use]
    pub fn into_defaults(self) -> QuizDefaults {
        QuizDefaults {
            last_question_count: self.last_question_count,
        }
    }
}

//
// ─── REPOSITORY CONTRACTS ──────────────────────────────────────────────────────
//

/// Repository contract for the singleton section registry.
#[async_trait]
pub trait SectionRegistryRepository: Send + Sync {
    /// Fetch the registry. `None` means nothing has been persisted yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the registry cannot be read or decoded.
    async fn load_registry(&self) -> Result<Option<SectionRegistry>, StorageError>;

    /// Persist the full registry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the registry cannot be stored.
    async fn save_registry(&self, registry: &SectionRegistry) -> Result<(), StorageError>;
}

/// Repository contract for per-section question lists.
#[async_trait]
pub trait QuestionBankRepository: Send + Sync {
    /// Fetch a section's questions in insertion order; an absent key reads
    /// as an empty list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be read or decoded.
    async fn load_questions(&self, section_id: &SectionId) -> Result<Vec<Question>, StorageError>;

    /// Persist a section's full question list (whole-record write; there is
    /// no partial append).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be stored.
    async fn save_questions(
        &self,
        section_id: &SectionId,
        questions: &[Question],
    ) -> Result<(), StorageError>;
}

/// Repository contract for remembered quiz setup defaults.
#[async_trait]
pub trait QuizDefaultsRepository: Send + Sync {
    /// Fetch the remembered defaults, if any were saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be read or decoded.
    async fn load_defaults(&self) -> Result<Option<QuizDefaults>, StorageError>;

    /// Persist the defaults.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn save_defaults(&self, defaults: &QuizDefaults) -> Result<(), StorageError>;
}

//
// ─── KV-BACKED IMPLEMENTATION ──────────────────────────────────────────────────
//

/// Repository implementation over any [`KeyValueStore`].
#[derive(Clone)]
pub struct KvRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvRepository {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SectionRegistryRepository for KvRepository {
    async fn load_registry(&self) -> Result<Option<SectionRegistry>, StorageError> {
        let Some(value) = self.store.get(SECTIONS_KEY).await? else {
            return Ok(None);
        };
        let record: SectionRegistryRecord = serde_json::from_value(value).map_err(ser)?;
        record.into_registry().map(Some)
    }

    async fn save_registry(&self, registry: &SectionRegistry) -> Result<(), StorageError> {
        let record = SectionRegistryRecord::from_registry(registry);
        let value = serde_json::to_value(record).map_err(ser)?;
        self.store.set(SECTIONS_KEY, value).await
    }
}

#[async_trait]
impl QuestionBankRepository for KvRepository {
    async fn load_questions(&self, section_id: &SectionId) -> Result<Vec<Question>, StorageError> {
        let key = question_bank_key(section_id);
        let Some(value) = self.store.get(&key).await? else {
            return Ok(Vec::new());
        };
        let records: Vec<QuestionRecord> = serde_json::from_value(value).map_err(ser)?;
        records
            .into_iter()
            .map(QuestionRecord::into_question)
            .collect()
    }

    async fn save_questions(
        &self,
        section_id: &SectionId,
        questions: &[Question],
    ) -> Result<(), StorageError> {
        let records: Vec<QuestionRecord> =
            questions.iter().map(QuestionRecord::from_question).collect();
        let value = serde_json::to_value(records).map_err(ser)?;
        self.store.set(&question_bank_key(section_id), value).await
    }
}

#[async_trait]
impl QuizDefaultsRepository for KvRepository {
    async fn load_defaults(&self) -> Result<Option<QuizDefaults>, StorageError> {
        let Some(value) = self.store.get(MAIN_DATA_KEY).await? else {
            return Ok(None);
        };
        let record: QuizDefaultsRecord = serde_json::from_value(value).map_err(ser)?;
        Ok(Some(record.into_defaults()))
    }

    async fn save_defaults(&self, defaults: &QuizDefaults) -> Result<(), StorageError> {
        let record = QuizDefaultsRecord::from_defaults(defaults);
        let value = serde_json::to_value(record).map_err(ser)?;
        self.store.set(MAIN_DATA_KEY, value).await
    }
}

//
// ─── AGGREGATE ─────────────────────────────────────────────────────────────────
//

/// Aggregates the repositories behind trait objects for easy backend
/// swapping.
#[derive(Clone)]
pub struct Store {
    pub registry: Arc<dyn SectionRegistryRepository>,
    pub questions: Arc<dyn QuestionBankRepository>,
    pub defaults: Arc<dyn QuizDefaultsRepository>,
}

impl Store {
    /// Build a `Store` over the given key-value adapter.
    #[must_use]
    pub fn over(store: Arc<dyn KeyValueStore>) -> Self {
        let repo = KvRepository::new(store);
        Self {
            registry: Arc::new(repo.clone()),
            questions: Arc::new(repo.clone()),
            defaults: Arc::new(repo),
        }
    }

    /// Build a `Store` backed by an in-memory map.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::over(Arc::new(InMemoryStore::new()))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
