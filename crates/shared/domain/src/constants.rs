//! Well-known names shared between slices, migrations and the HTTP surface.

/// `OpenAPI` tag for system endpoints.
pub const SYSTEM_TAG: &str = "System";
/// `OpenAPI` tag for the documentation consistency endpoints.
pub const DOCUMENTATION_TAG: &str = "Documentation";

/// Table holding the feature registry.
pub const FEATURE_TABLE: &str = "feature";
/// Table holding documentation manual sections.
pub const SECTION_TABLE: &str = "doc_section";
/// Table recording applied migrations.
pub const MIGRATION_TABLE: &str = "migration";

/// Prefix of environment variables that override file configuration.
pub const ENV_PREFIX: &str = "HRHUB";
