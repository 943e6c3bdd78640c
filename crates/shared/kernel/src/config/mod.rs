use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of environment overrides, e.g. `CONFHUB__DATABASE__URL`.
pub const ENV_PREFIX: &str = "CONFHUB";
const DEFAULT_CONFIG_FILE: &str = "server";

#[confhub_derive::confhub_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads layered configuration: a file, then `CONFHUB__` environment variables on top.
///
/// With an explicit `path` the file must exist. Without one, `server.{toml,yaml,json,...}`
/// in the working directory is used when present and defaults apply otherwise.
/// Nested keys use a double underscore: `CONFHUB__SERVER__PORT=8080` sets `server.port`.
///
/// # Errors
/// Returns [`ConfigError::Config`] if a required file is missing, a source cannot be parsed
/// or the merged values do not match `T`.
///
/// # Example
/// ```rust
/// use confhub_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let required = path.is_some();
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    info!(path = %effective_path.display(), required, "Loading configuration");

    layered(&effective_path, required, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .convert_case(config::Case::Snake)
}

fn layered<T>(path: &Path, required: bool, env: Environment) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    Config::builder()
        .add_source(File::from(path).required(required))
        .add_source(env)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}
