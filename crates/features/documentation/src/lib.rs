//! Documentation consistency slice.
//!
//! Keeps the user manual and the feature registry honest with each other:
//!
//! * [`validator`] flags references to codes the registry does not know (orphaned) and sections
//!   that reference nothing (unmapped);
//! * [`scorer`] folds a validation report into a 0..=100 health score and a status;
//! * [`coverage`] reports which active features a section with content actually documents;
//! * [`remediation`] removes or links codes on a single section, idempotently.
//!
//! [`DocumentationService`] ties these to a [`DocumentationStore`] and caches the last report.
//! With the `server` feature the slice also provides the `SurrealDB` store, its schema
//! migrations and the HTTP routes.

pub mod coverage;
mod error;
mod events;
pub mod model;
pub mod reader;
pub mod remediation;
pub mod scorer;
mod service;
pub mod store;
pub mod validator;

#[cfg(feature = "server")]
mod migrations;
#[cfg(feature = "server")]
mod server;
#[cfg(feature = "server")]
mod slice;

pub use error::{DocumentationError, DocumentationErrorExt};
pub use events::DocumentationEvent;
pub use service::DocumentationService;
pub use store::{DocumentationStore, MemoryDocumentationStore, StoreError, StoreErrorExt};

#[cfg(feature = "server")]
pub use migrations::migrations;
#[cfg(feature = "server")]
pub use server::{ErrorResponse, SectionCodesRequest, router};
#[cfg(feature = "server")]
pub use slice::{Documentation, DocumentationInner, init};
#[cfg(feature = "server")]
pub use store::SurrealDocumentationStore;
