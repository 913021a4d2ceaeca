use super::{DocumentationStore, StoreError};
use crate::model::{CodeSet, DocumentationSection, FeatureDefinition};
use parking_lot::RwLock;
use std::sync::Arc;

/// Process-local store keeping features and sections in insertion order.
///
/// Backs single-node tooling without a database and the slice's own tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentationStore {
    inner: Arc<RwLock<Collections>>,
}

#[derive(Debug, Default)]
struct Collections {
    features: Vec<FeatureDefinition>,
    sections: Vec<DocumentationSection>,
}

impl MemoryDocumentationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_data(features: Vec<FeatureDefinition>, sections: Vec<DocumentationSection>) -> Self {
        Self { inner: Arc::new(RwLock::new(Collections { features, sections })) }
    }

    /// Inserts or replaces a feature by code.
    pub fn put_feature(&self, feature: FeatureDefinition) {
        let mut inner = self.inner.write();
        match inner.features.iter_mut().find(|f| f.code == feature.code) {
            Some(existing) => *existing = feature,
            None => inner.features.push(feature),
        }
    }

    /// Inserts or replaces a section by id.
    pub fn put_section(&self, section: DocumentationSection) {
        let mut inner = self.inner.write();
        match inner.sections.iter_mut().find(|s| s.id == section.id) {
            Some(existing) => *existing = section,
            None => inner.sections.push(section),
        }
    }

    #[must_use]
    pub fn section(&self, section_id: &str) -> Option<DocumentationSection> {
        self.inner.read().sections.iter().find(|s| s.id == section_id).cloned()
    }

    fn sections_where(&self, mapped: bool) -> Vec<DocumentationSection> {
        self.inner
            .read()
            .sections
            .iter()
            .filter(|s| s.referenced_codes.is_empty() != mapped)
            .cloned()
            .collect()
    }
}

impl DocumentationStore for MemoryDocumentationStore {
    async fn list_active_features(&self) -> Result<Vec<FeatureDefinition>, StoreError> {
        Ok(self.inner.read().features.iter().filter(|f| f.active).cloned().collect())
    }

    async fn list_sections_with_references(&self) -> Result<Vec<DocumentationSection>, StoreError> {
        Ok(self.sections_where(true))
    }

    async fn list_unmapped_sections(&self) -> Result<Vec<DocumentationSection>, StoreError> {
        Ok(self.sections_where(false))
    }

    async fn update_section_references(
        &self,
        section_id: &str,
        codes: &CodeSet,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        let section = inner.sections.iter_mut().find(|s| s.id == section_id).ok_or_else(|| {
            StoreError::NotFound { message: section_id.to_owned().into(), context: None }
        })?;
        section.referenced_codes.clone_from(codes);
        Ok(())
    }

    async fn fetch_section(&self, section_id: &str) -> Result<DocumentationSection, StoreError> {
        self.section(section_id).ok_or_else(|| StoreError::NotFound {
            message: section_id.to_owned().into(),
            context: None,
        })
    }
}
