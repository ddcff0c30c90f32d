use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment prefix for overrides (`FCHECK__EARTH_ENGINE__PROJECT`).
pub const ENV_PREFIX: &str = "FCHECK";
/// Config file looked up when no path is given (any extension `config` understands).
pub const DEFAULT_CONFIG_FILE: &str = "server";

#[fcheck_derive::fcheck_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads layered configuration into `T`.
///
/// 1. **File**: `path` when given (must exist), otherwise [`DEFAULT_CONFIG_FILE`] in the
///    working directory if present.
/// 2. **Environment**: variables prefixed with `FCHECK__`; nested keys are separated by a
///    double underscore (`FCHECK__SERVER__PORT=8080` sets `server.port`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if an explicit file is missing, a source cannot be parsed,
/// or the merged values do not match `T`.
///
/// # Example
/// ```rust
/// use fcheck_kernel::config::load_config;
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
    let (effective_path, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    info!(path = %effective_path.display(), required, "Loading configuration");

    Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .convert_case(config::Case::Snake)
                .try_parsing(true),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}
