#![forbid(unsafe_code)]

pub mod keys;
pub mod kv;
pub mod repository;
pub mod sqlite;

pub use kv::{InMemoryStore, KeyValueStore, StorageError};
pub use repository::{
    KvRepository, QuestionBankRepository, QuizDefaultsRepository, SectionRegistryRepository, Store,
};
