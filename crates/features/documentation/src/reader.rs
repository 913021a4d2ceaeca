//! Registry and corpus readers.

use crate::error::{DocumentationError, DocumentationErrorExt};
use crate::model::{DocumentationSection, FeatureDefinition};
use crate::store::DocumentationStore;
use fxhash::FxHashSet;
use tracing::{debug, instrument};

/// Immutable view of the registry and the corpus taken at one point in time.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Active registry entries.
    pub features: Vec<FeatureDefinition>,
    /// Mapped sections first, then unmapped ones, each in store order.
    pub sections: Vec<DocumentationSection>,
}

/// Loads the active features.
///
/// # Errors
/// Returns [`DocumentationError::Fetch`] if the store read fails.
pub async fn read_registry<S: DocumentationStore>(
    store: &S,
) -> Result<Vec<FeatureDefinition>, DocumentationError> {
    let mut features = store.list_active_features().await.context("Reading feature registry")?;
    features.retain(|feature| feature.active);
    Ok(features)
}

/// Loads every documentation section, mapped and unmapped.
///
/// A section returned by both store queries is kept once.
///
/// # Errors
/// Returns [`DocumentationError::Fetch`] if either store read fails.
pub async fn read_corpus<S: DocumentationStore>(
    store: &S,
) -> Result<Vec<DocumentationSection>, DocumentationError> {
    let (mapped, unmapped) =
        tokio::try_join!(store.list_sections_with_references(), store.list_unmapped_sections())
            .context("Reading documentation corpus")?;

    let mut seen = FxHashSet::default();
    Ok(mapped.into_iter().chain(unmapped).filter(|section| seen.insert(section.id.clone())).collect())
}

/// Reads registry and corpus concurrently. Either failure fails the whole snapshot.
///
/// # Errors
/// Returns [`DocumentationError::Fetch`] if any store read fails.
#[instrument(skip_all)]
pub async fn read_snapshot<S: DocumentationStore>(
    store: &S,
) -> Result<Snapshot, DocumentationError> {
    let (features, sections) = tokio::try_join!(read_registry(store), read_corpus(store))?;
    debug!(features = features.len(), sections = sections.len(), "Snapshot loaded");
    Ok(Snapshot { features, sections })
}
