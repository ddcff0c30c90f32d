use anyhow::Context;
use fcheck::domain::config::ApiConfig;
use fcheck::kernel::config::{DEFAULT_CONFIG_FILE, load_config};
use fcheck_logger::{LevelFilter, Logger};
use fcheck_server::Server;
use std::borrow::Cow;
use std::ffi::OsStr;

/// Optional path of the configuration file; `server.*` in the working directory otherwise.
const CONFIG_PATH_VAR: &str = "FCHECK_CONFIG";
/// Port override honoured by most hosting platforms.
const PORT_VAR: &str = "PORT";

#[fcheck_runtime::main(high_performance)]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var_os(CONFIG_PATH_VAR);
    let mut cfg: ApiConfig =
        load_config(config_path.as_ref()).context("Critical: Configuration is malformed")?;

    if let Ok(port) = std::env::var(PORT_VAR) {
        cfg.server.port = port.parse().with_context(|| format!("Invalid {PORT_VAR} '{port}'"))?;
    }

    let _log = init_logger(&cfg)?;
    tracing::info!(
        file = %config_source(config_path.as_deref()),
        port = cfg.server.port,
        "Configuration loaded"
    );

    Server::builder().config(cfg).build()?.run().await
}

/// File the configuration was read from, as shown in the startup log.
fn config_source(path: Option<&OsStr>) -> Cow<'_, str> {
    path.map_or(Cow::Borrowed(DEFAULT_CONFIG_FILE), OsStr::to_string_lossy)
}

fn init_logger(cfg: &ApiConfig) -> anyhow::Result<Logger> {
    let logging = &cfg.logging;
    let level: LevelFilter = logging.level.parse().context("Invalid logging.level")?;

    let mut builder = Logger::builder(env!("CARGO_PKG_NAME")).level(level).json(logging.json);
    if let Some(filter) = &logging.filter {
        builder = builder.env_filter(filter);
    }
    if let Some(path) = &logging.path {
        builder = builder.path(path);
    }

    Ok(builder.init()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_source_names_the_explicit_file() {
        assert_eq!(config_source(Some(OsStr::new("/etc/fcheck/prod.toml"))), "/etc/fcheck/prod.toml");
    }

    #[test]
    fn config_source_falls_back_to_the_default_file() {
        assert_eq!(config_source(None), DEFAULT_CONFIG_FILE);
    }
}
