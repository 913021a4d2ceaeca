use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level application configuration shared across services.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub documentation: DocumentationConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten, default)]
    inner: Arc<ApiConfigInner>,
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// `SurrealDB` connection configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub credentials: Option<DatabaseCredentials>,
}

/// `SurrealDB` root credentials (optional when using unauthenticated engines like mem://).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseCredentials {
    pub username: String,
    pub password: String,
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level directive (`trace`, `debug`, `info`, `warn`, `error`).
    pub level: String,
    /// Extra `EnvFilter` directives, e.g. `hrhub_documentation=debug`.
    pub filter: Option<String>,
    pub console: bool,
    /// JSON lines for the file layer.
    pub json: bool,
    /// Directory for rolling log files; file logging is off when unset.
    pub directory: Option<PathBuf>,
    pub max_files: usize,
    pub rotation: LogRotation,
}

/// Rolling file rotation period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Minutely,
    Hourly,
    Daily,
    Never,
}

/// Documentation consistency settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocumentationConfig {
    pub health: HealthPolicy,
    /// Maximum number of undocumented features listed in a coverage report.
    pub undocumented_display_limit: usize,
    /// Suggested section for an undocumented feature; `{module}` is replaced by its module code.
    pub suggested_section_template: String,
}

/// Scoring and status thresholds for the documentation health score.
///
/// ```text
/// score = clamp(100 - min(orphan_cap, orphaned * orphan_penalty)
///                   - min(unmapped_cap, unmapped * unmapped_penalty)
///                   + min(valid_bonus_cap, valid_mappings), 0, 100)
/// ```
///
/// Status is `critical` when `score < critical_below` or `orphaned > critical_orphans_above`,
/// otherwise `warning` when `score < warning_below`, `orphaned > warning_orphans_above` or
/// `unmapped > warning_unmapped_above`, otherwise `healthy`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HealthPolicy {
    pub orphan_penalty: u32,
    pub orphan_penalty_cap: u32,
    pub unmapped_penalty: u32,
    pub unmapped_penalty_cap: u32,
    pub valid_bonus_cap: u32,
    pub critical_below: u32,
    pub critical_orphans_above: usize,
    pub warning_below: u32,
    pub warning_orphans_above: usize,
    pub warning_unmapped_above: usize,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 4680, ssl: None }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "mem://".to_owned(),
            namespace: "hrhub".to_owned(),
            database: "core".to_owned(),
            credentials: None,
        }
    }
}

impl Default for DatabaseCredentials {
    fn default() -> Self {
        Self { username: "root".to_owned(), password: "root".to_owned() }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            filter: None,
            console: true,
            json: false,
            directory: None,
            max_files: 10,
            rotation: LogRotation::Daily,
        }
    }
}

impl Default for DocumentationConfig {
    fn default() -> Self {
        Self {
            health: HealthPolicy::default(),
            undocumented_display_limit: 50,
            suggested_section_template: "{module}: new section".to_owned(),
        }
    }
}

impl Default for HealthPolicy {
    fn default() -> Self {
        Self {
            orphan_penalty: 10,
            orphan_penalty_cap: 50,
            unmapped_penalty: 2,
            unmapped_penalty_cap: 30,
            valid_bonus_cap: 20,
            critical_below: 60,
            critical_orphans_above: 5,
            warning_below: 80,
            warning_orphans_above: 0,
            warning_unmapped_above: 10,
        }
    }
}
