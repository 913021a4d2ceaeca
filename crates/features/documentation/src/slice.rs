use crate::error::DocumentationError;
use crate::service::DocumentationService;
use crate::store::SurrealDocumentationStore;
use hrhub_database::Database;
use hrhub_domain::config::ApiConfig;
use hrhub_event_bus::EventBus;
use hrhub_kernel::domain::registry::InitializedSlice;

/// Documentation slice state.
#[hrhub_derive::hrhub_slice]
pub struct Documentation {
    pub service: DocumentationService<SurrealDocumentationStore>,
}

/// Initialize the documentation slice on the shared database and event bus.
///
/// # Errors
/// Currently infallible; the signature matches the other slice initializers.
#[allow(clippy::unnecessary_wraps)]
pub fn init(
    config: &ApiConfig,
    database: &Database,
    events: &EventBus,
) -> Result<InitializedSlice, DocumentationError> {
    let store = SurrealDocumentationStore::new(database.clone());
    let service =
        DocumentationService::new(store, config.documentation.clone()).with_events(events.clone());

    tracing::info!(
        display_limit = config.documentation.undocumented_display_limit,
        "Documentation slice initialized"
    );

    Ok(InitializedSlice::new(Documentation::new(DocumentationInner { service })))
}
