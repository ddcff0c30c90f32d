use crate::constants::{
    DEFAULT_BAND, DEFAULT_CREDENTIALS_ENV, DEFAULT_DATASET, DEFAULT_MAX_PIXELS, DEFAULT_SCALE,
};
use crate::landcover::QualifyingClasses;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level service configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub earth_engine: EarthEngineConfig,
    pub classification: ClassificationConfig,
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

/// HTTP listener.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    /// Seconds granted to in-flight requests on shutdown.
    pub shutdown_grace_secs: u64,
}

/// Subscriber settings handed to the logger.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `trace`, `debug`, `info`, `warn` or `error`.
    pub level: String,
    /// Extra filter directives, e.g. `fcheck_landcover=debug`.
    pub filter: Option<String>,
    /// Directory for rolling log files; console only when unset.
    pub path: Option<PathBuf>,
    pub json: bool,
}

/// Remote raster service (Google Earth Engine REST API).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EarthEngineConfig {
    pub base_url: String,
    /// Cloud project billed for the computations. Falls back to the key's `project_id`.
    pub project: Option<String>,
    /// Image collection asset holding the land-cover classification.
    pub dataset: String,
    pub band: String,
    /// Ground resolution of the reduction, in meters.
    pub scale: f64,
    pub max_pixels: u64,
    /// Upper bound for a single remote call.
    pub timeout_secs: u64,
    pub credentials: CredentialsConfig,
}

/// Where the service-account key comes from. Checked in order: `access_token`, `file`, `env`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Pre-issued OAuth2 bearer token (development only; it is never refreshed).
    pub access_token: Option<String>,
    /// Path to a service-account key JSON file.
    pub file: Option<PathBuf>,
    /// Environment variable holding the key JSON.
    pub env: Option<String>,
}

/// Classification policy.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Classes whose area is measured, e.g. `["cropland", "forest"]`.
    pub qualifying: QualifyingClasses,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 3000, shutdown_grace_secs: 30 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), filter: None, path: None, json: false }
    }
}

impl Default for EarthEngineConfig {
    fn default() -> Self {
        Self {
            base_url: "https://earthengine.googleapis.com".to_owned(),
            project: None,
            dataset: DEFAULT_DATASET.to_owned(),
            band: DEFAULT_BAND.to_owned(),
            scale: DEFAULT_SCALE,
            max_pixels: DEFAULT_MAX_PIXELS,
            timeout_secs: 30,
            credentials: CredentialsConfig::default(),
        }
    }
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self { access_token: None, file: None, env: Some(DEFAULT_CREDENTIALS_ENV.to_owned()) }
    }
}
