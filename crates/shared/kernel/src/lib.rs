//! Kernel utilities shared across slices.
//!
//! Keep this crate lightweight: configuration loading, record id guards and, behind the
//! `server` feature, the shared API state and system routes.
//!
//! ```rust,no_run
//! use hrhub_kernel::config::load_config;
//! use hrhub_kernel::domain::config::ApiConfig;
//!
//! let config: ApiConfig = load_config(Some("server.toml")).unwrap_or_default();
//! assert_eq!(config.documentation.undocumented_display_limit, 50);
//! ```

pub mod config;
pub mod security;
#[cfg(feature = "server")]
pub mod server;

pub use hrhub_domain as domain;
