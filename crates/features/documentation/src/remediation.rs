//! Remediation: idempotent removal and linking of feature codes on one section.
//!
//! Both operations are a read-modify-write of the section's reference set. Calls for the same
//! section are serialized inside this process by [`SectionLocks`]; writers in other processes can
//! still interleave (last write wins).

use crate::error::DocumentationError;
use crate::model::{CodeSet, RemediationOperation, RemediationOutcome};
use crate::store::{DocumentationStore, StoreError};
use fxhash::FxHashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::{debug, info, instrument, warn};

/// Keyed async mutex: one lock per section id.
///
/// Entries are dropped again once no task holds or waits for them.
#[derive(Debug, Default)]
pub struct SectionLocks {
    locks: Mutex<FxHashMap<String, Arc<AsyncMutex<()>>>>,
}

impl SectionLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `section_id`.
    pub async fn acquire(&self, section_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock();
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(section_id.to_owned()).or_default())
        };
        lock.lock_owned().await
    }

    /// Number of sections currently locked or awaited.
    #[cfg(test)]
    fn active(&self) -> usize {
        self.locks.lock().values().filter(|lock| Arc::strong_count(lock) > 1).count()
    }
}

/// Removes `codes` from the section's references.
///
/// Codes not present are ignored, so repeating the call is a no-op.
///
/// # Errors
/// [`DocumentationError::SectionNotFound`] for an unknown section, otherwise
/// [`DocumentationError::Persistence`] when the read or the write fails.
pub async fn remove_orphaned_codes<S: DocumentationStore>(
    store: &S,
    section_id: &str,
    codes: &CodeSet,
) -> Result<RemediationOutcome, DocumentationError> {
    apply(store, section_id, RemediationOperation::RemoveOrphanedCodes, |current| {
        current.difference(codes).cloned().collect()
    })
    .await
}

/// Adds `codes` to the section's references.
///
/// Codes already present are kept once, so repeating the call is a no-op.
///
/// # Errors
/// [`DocumentationError::SectionNotFound`] for an unknown section, otherwise
/// [`DocumentationError::Persistence`] when the read or the write fails.
pub async fn link_features_to_section<S: DocumentationStore>(
    store: &S,
    section_id: &str,
    codes: &CodeSet,
) -> Result<RemediationOutcome, DocumentationError> {
    apply(store, section_id, RemediationOperation::LinkFeaturesToSection, |current| {
        current.union(codes).cloned().collect()
    })
    .await
}

#[instrument(skip(store, operation, change), fields(%operation))]
async fn apply<S, F>(
    store: &S,
    section_id: &str,
    operation: RemediationOperation,
    change: F,
) -> Result<RemediationOutcome, DocumentationError>
where
    S: DocumentationStore,
    F: FnOnce(&CodeSet) -> CodeSet,
{
    let section = store.fetch_section(section_id).await.map_err(|err| {
        failure(section_id, operation, err, "Reading section failed")
    })?;

    let before = section.referenced_codes;
    let after = change(&before);
    let changed = after != before;

    if changed {
        store.update_section_references(section_id, &after).await.map_err(|err| {
            failure(section_id, operation, err, "Writing section references failed")
        })?;
        info!(before = before.len(), after = after.len(), "Section references updated");
    } else {
        debug!("Section already in the requested state; nothing written");
    }

    Ok(RemediationOutcome { section_id: section_id.to_owned(), operation, before, after, changed })
}

/// A section missing on either the read or the write is `SectionNotFound`; anything else is a
/// persistence failure.
fn failure(
    section_id: &str,
    operation: RemediationOperation,
    err: StoreError,
    step: &'static str,
) -> DocumentationError {
    match err {
        StoreError::NotFound { .. } => DocumentationError::SectionNotFound {
            message: section_id.to_owned().into(),
            context: Some(operation.to_string().into()),
        },
        other => {
            warn!(error = %other, "{step}");
            DocumentationError::persistence(section_id, operation, &other)
        },
    }
}
