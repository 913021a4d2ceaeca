//! Facade crate for `HR Hub` features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `hrhub` with the `server` feature.
//! - Pass [`migrations`] to the database builder, then call [`init`] to register feature slices
//!   and mount [`api_router`].

pub use hrhub_domain as domain;
pub use hrhub_kernel as kernel;

#[cfg(feature = "server")]
use hrhub_database::{Database, Migration};
#[cfg(feature = "server")]
use hrhub_domain::config::ApiConfig;
#[cfg(feature = "server")]
use hrhub_event_bus::EventBus;
#[cfg(feature = "server")]
use hrhub_kernel::server::ApiState;
#[cfg(feature = "server")]
use utoipa_axum::router::OpenApiRouter;

/// Feature registry for runtime introspection.
pub mod features {
    pub use hrhub_documentation as documentation;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        "documentation",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Schema migrations of every enabled slice, in application order.
#[cfg(feature = "server")]
#[must_use]
pub fn migrations() -> Vec<Migration> {
    let mut migrations = Vec::new();
    migrations.extend(features::documentation::migrations());
    migrations
}

/// Initialize all enabled features for server mode.
///
/// # Errors
/// Returns an error if any feature initialization fails.
#[cfg(feature = "server")]
pub fn init(
    config: &ApiConfig,
    database: &Database,
    events: &EventBus,
) -> Result<Vec<domain::registry::InitializedSlice>, Box<dyn std::error::Error + Send + Sync>> {
    let mut slices = Vec::new();

    // Documentation consistency
    slices.push(features::documentation::init(config, database, events)?);

    Ok(slices)
}

/// System routes plus the routes of every enabled slice.
#[cfg(feature = "server")]
pub fn api_router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .merge(hrhub_kernel::server::system_router())
        .merge(features::documentation::router())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documentation_is_always_enabled() {
        assert!(features::is_enabled("documentation"));
        assert!(!features::is_enabled("licensing"));
    }

    #[cfg(feature = "server")]
    #[test]
    fn test_migrations_are_collected() {
        let migrations = migrations();
        assert!(migrations.iter().any(|m| m.slice() == "documentation"));
    }
}
