use std::sync::Arc;

use tracing::info;

use quiz_core::model::{Section, SectionId, SectionRegistry};
use storage::repository::SectionRegistryRepository;

use crate::error::SectionServiceError;

/// Orchestrates section creation and registry persistence.
///
/// The registry is a whole-record read-modify-write: every mutation loads
/// the current registry, applies the change, and persists the full record.
#[derive(Clone)]
pub struct SectionService {
    registry: Arc<dyn SectionRegistryRepository>,
}

impl SectionService {
    #[must_use]
    pub fn new(registry: Arc<dyn SectionRegistryRepository>) -> Self {
        Self { registry }
    }

    /// Fetch the registry, initializing and persisting the default one when
    /// nothing has been stored yet.
    ///
    /// The returned registry carries `last_section`, which the authoring
    /// flow preselects; the quiz setup screen ignores it and always starts
    /// with an empty selection.
    ///
    /// # Errors
    ///
    /// Returns `SectionServiceError::Storage` if the registry cannot be read
    /// or the bootstrap registry cannot be persisted.
    pub async fn load(&self) -> Result<SectionRegistry, SectionServiceError> {
        if let Some(registry) = self.registry.load_registry().await? {
            return Ok(registry);
        }

        let registry = SectionRegistry::bootstrap();
        self.registry.save_registry(&registry).await?;
        info!("initialized section registry with the default section");
        Ok(registry)
    }

    /// Create a section with a fresh collision-resistant id and persist the
    /// registry.
    ///
    /// # Errors
    ///
    /// Returns `SectionServiceError::Section` when the name trims to empty.
    /// Returns `SectionServiceError::Storage` if persistence fails; the
    /// stored registry is left unchanged in that case.
    pub async fn add_section(
        &self,
        name: impl Into<String>,
    ) -> Result<SectionId, SectionServiceError> {
        let section = Section::new(SectionId::generate(), name)?;
        let id = section.id().clone();

        let mut registry = self.load().await?;
        registry.push(section)?;
        self.registry.save_registry(&registry).await?;
        Ok(id)
    }

    /// Remember a section as the most recently selected one.
    ///
    /// Unknown ids are rejected rather than silently ignored, so the stored
    /// pointer can never dangle.
    ///
    /// # Errors
    ///
    /// Returns `SectionServiceError::Section` for unknown ids and
    /// `SectionServiceError::Storage` if persistence fails.
    pub async fn set_last_section(&self, id: &SectionId) -> Result<(), SectionServiceError> {
        let mut registry = self.load().await?;
        registry.set_last_section(id)?;
        self.registry.save_registry(&registry).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use quiz_core::model::{DEFAULT_SECTION_ID, DEFAULT_SECTION_NAME, SectionError};
    use storage::repository::Store;

    #[tokio::test]
    async fn load_bootstraps_and_persists_default_registry() {
        let store = Store::in_memory();
        let service = SectionService::new(store.registry.clone());

        let registry = service.load().await.unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.sections()[0].id().as_str(), DEFAULT_SECTION_ID);
        assert_eq!(registry.sections()[0].name(), DEFAULT_SECTION_NAME);
        assert_eq!(
            registry.last_section().map(SectionId::as_str),
            Some(DEFAULT_SECTION_ID)
        );

        // The bootstrap registry must be persisted, not just returned.
        let persisted = store.registry.load_registry().await.unwrap().unwrap();
        assert_eq!(persisted, registry);
    }

    #[tokio::test]
    async fn load_returns_existing_registry_untouched() {
        let store = Store::in_memory();
        let service = SectionService::new(store.registry.clone());

        let id = service.add_section("Algebra").await.unwrap();
        let registry = service.load().await.unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains(&id));
    }

    #[tokio::test]
    async fn add_section_rejects_blank_name_and_keeps_registry() {
        let store = Store::in_memory();
        let service = SectionService::new(store.registry.clone());
        let before = service.load().await.unwrap();

        let err = service.add_section("   ").await.unwrap_err();
        assert!(matches!(
            err,
            SectionServiceError::Section(SectionError::EmptyName)
        ));

        let after = store.registry.load_registry().await.unwrap().unwrap();
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn add_section_generates_distinct_ids() {
        let store = Store::in_memory();
        let service = SectionService::new(store.registry.clone());

        let a = service.add_section("One").await.unwrap();
        let b = service.add_section("Two").await.unwrap();
        assert_ne!(a, b);

        let registry = service.load().await.unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get(&a).unwrap().name(), "One");
        assert_eq!(registry.get(&b).unwrap().name(), "Two");
    }

    #[tokio::test]
    async fn set_last_section_persists_pointer() {
        let store = Store::in_memory();
        let service = SectionService::new(store.registry.clone());

        let id = service.add_section("Algebra").await.unwrap();
        service.set_last_section(&id).await.unwrap();

        let registry = store.registry.load_registry().await.unwrap().unwrap();
        assert_eq!(registry.last_section(), Some(&id));
    }

    #[tokio::test]
    async fn set_last_section_rejects_unknown_id() {
        let store = Store::in_memory();
        let service = SectionService::new(store.registry.clone());
        service.load().await.unwrap();

        let err = service
            .set_last_section(&SectionId::new("missing"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SectionServiceError::Section(SectionError::UnknownSection(_))
        ));

        let registry = store.registry.load_registry().await.unwrap().unwrap();
        assert_eq!(
            registry.last_section().map(SectionId::as_str),
            Some(DEFAULT_SECTION_ID)
        );
    }
}
