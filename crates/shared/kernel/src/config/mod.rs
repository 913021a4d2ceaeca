use config::{Config, Environment, File};
use hrhub_domain::constants::ENV_PREFIX;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

const DEFAULT_CONFIG_FILE: &str = "server";

#[hrhub_derive::hrhub_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads layered configuration: a file, then `HRHUB__`-prefixed environment overrides.
///
/// Nested keys use double underscores, so `HRHUB__DATABASE__URL` maps to `database.url`.
/// An explicit `path` must exist; without one, an optional `server.{toml,yaml,json}` in the
/// working directory is used when present and every value falls back to its default otherwise.
///
/// # Errors
/// Returns [`ConfigError::Config`] if an explicit file is missing, a source cannot be parsed, or
/// the merged values do not deserialize into `T`.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let file = match &path {
        Some(path) => {
            info!(path = %path.as_ref().display(), "Loading config");
            File::from(path.as_ref()).required(true)
        },
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}
