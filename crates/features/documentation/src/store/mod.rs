//! Persistence seam of the slice.
//!
//! The validator never talks to a database directly; it reads snapshots and writes reference sets
//! through [`DocumentationStore`].

mod memory;
#[cfg(feature = "server")]
mod surreal;

pub use memory::MemoryDocumentationStore;
#[cfg(feature = "server")]
pub use surreal::SurrealDocumentationStore;

use crate::model::{CodeSet, DocumentationSection, FeatureDefinition};
use std::borrow::Cow;
use std::future::Future;

/// Failures of the persistence collaborator.
#[hrhub_derive::hrhub_error]
pub enum StoreError {
    /// The requested record does not exist.
    #[error("Record not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The store is unreachable or rejected the operation.
    #[error("Store unavailable{}: {message}", format_context(.context))]
    Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[cfg(feature = "server")]
    #[error("SurrealDB error{}: {source}", format_context(.context))]
    Surreal {
        #[source]
        source: surrealdb::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal store error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Read and write operations the consistency checks need from a data store.
pub trait DocumentationStore: Send + Sync + 'static {
    /// Registry entries that are currently active.
    fn list_active_features(
        &self,
    ) -> impl Future<Output = Result<Vec<FeatureDefinition>, StoreError>> + Send;

    /// Sections whose reference set is present and non-empty.
    fn list_sections_with_references(
        &self,
    ) -> impl Future<Output = Result<Vec<DocumentationSection>, StoreError>> + Send;

    /// Sections whose reference set is absent or empty.
    fn list_unmapped_sections(
        &self,
    ) -> impl Future<Output = Result<Vec<DocumentationSection>, StoreError>> + Send;

    /// Replaces the reference set of one section.
    ///
    /// Fails with [`StoreError::NotFound`] if the section does not exist.
    fn update_section_references(
        &self,
        section_id: &str,
        codes: &CodeSet,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Reads one section.
    ///
    /// Fails with [`StoreError::NotFound`] if the section does not exist.
    fn fetch_section(
        &self,
        section_id: &str,
    ) -> impl Future<Output = Result<DocumentationSection, StoreError>> + Send;
}
