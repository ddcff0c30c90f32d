//! # Earth Engine
//!
//! Minimal client for the Google Earth Engine REST API, covering what land-cover checks need:
//! the majority class of a raster band inside a polygon and the polygon's area.
//!
//! Computations are posted to `v1/projects/{project}/value:compute` as expression graphs
//! (see [`expression`]). Authentication runs in the background; until a token is available
//! every call fails fast with [`EarthEngineError::NotReady`].

mod auth;
mod error;
pub mod expression;
mod session;

pub use crate::auth::{Credentials, DEFAULT_TOKEN_URI, EARTH_ENGINE_SCOPE, ServiceAccountKey};
pub use crate::error::{EarthEngineError, EarthEngineErrorExt};
pub use crate::expression::Polygon;
pub use crate::session::{Session, SessionStatus};

use crate::expression::{Node, compute_body};
use fcheck_domain::config::EarthEngineConfig;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Deserialize)]
struct ComputeReply {
    #[serde(default)]
    result: Value,
}

#[derive(Deserialize)]
struct ErrorReply {
    error: ErrorStatus,
}

#[derive(Deserialize)]
struct ErrorStatus {
    #[serde(default)]
    code: u16,
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Earth Engine client bound to one project and one land-cover band.
#[derive(Debug)]
pub struct EarthEngine {
    http: reqwest::Client,
    compute_url: String,
    session: Session,
    dataset: String,
    band: String,
    scale: f64,
    max_pixels: u64,
    authenticator: Option<JoinHandle<()>>,
}

impl EarthEngine {
    /// Resolves credentials and starts authenticating in the background.
    ///
    /// Must be called inside a Tokio runtime. Returns as soon as the client is configured;
    /// use [`Self::is_ready`] to learn when requests can be served.
    pub fn connect(config: &EarthEngineConfig) -> Result<Self, EarthEngineError> {
        let credentials = Credentials::resolve(&config.credentials)?;
        Self::with_credentials(config, credentials)
    }

    pub fn with_credentials(
        config: &EarthEngineConfig,
        credentials: Credentials,
    ) -> Result<Self, EarthEngineError> {
        let project = config
            .project
            .as_deref()
            .or_else(|| credentials.project_id())
            .ok_or_else(|| EarthEngineError::Credentials {
                message: "no project configured and the key names none".into(),
                context: None,
            })?
            .to_owned();

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|source| EarthEngineError::Http {
                source,
                context: Some("Building HTTP client".into()),
            })?;

        let (session, authenticator) = match credentials {
            Credentials::StaticToken(token) => (Session::with_token(token), None),
            Credentials::ServiceAccount(key) => {
                let session = Session::pending();
                let task = session::spawn_authenticator(session.clone(), http.clone(), *key);
                (session, Some(task))
            },
        };

        tracing::info!(project = %project, dataset = %config.dataset, "Earth Engine client configured");

        Ok(Self {
            compute_url: format!(
                "{}/v1/projects/{project}/value:compute",
                config.base_url.trim_end_matches('/')
            ),
            http,
            session,
            dataset: config.dataset.clone(),
            band: config.band.clone(),
            scale: config.scale,
            max_pixels: config.max_pixels,
            authenticator,
        })
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.session.is_ready()
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Fails with [`EarthEngineError::NotReady`] unless a token is available.
    pub fn ensure_ready(&self) -> Result<(), EarthEngineError> {
        self.session.bearer().map(drop)
    }

    /// Most frequent value of the configured band inside `region`.
    ///
    /// `None` when the region holds no valid pixel.
    pub async fn majority_value(&self, region: &Polygon) -> Result<Option<f64>, EarthEngineError> {
        let image = expression::band(&self.dataset, &self.band);
        let root = expression::mode_of_band(image, &self.band, region, self.scale, self.max_pixels);

        match self.compute(root).await? {
            Value::Null => Ok(None),
            Value::Number(n) => Ok(n.as_f64()),
            other => Err(unexpected("band value", &other)),
        }
    }

    /// Area of `region` in square meters.
    pub async fn area(&self, region: &Polygon) -> Result<f64, EarthEngineError> {
        let value = self.compute(expression::area(region)).await?;
        value.as_f64().ok_or_else(|| unexpected("area", &value))
    }

    /// Evaluates an expression graph and returns its `result`.
    pub async fn compute(&self, root: Node) -> Result<Value, EarthEngineError> {
        let token = self.session.bearer()?;

        let response = self
            .http
            .post(&self.compute_url)
            .bearer_auth(token)
            .json(&compute_body(root))
            .send()
            .await
            .context("value:compute request")?;

        let status = response.status();
        let body = response.bytes().await.context("value:compute reply")?;

        if !status.is_success() {
            let error = serde_json::from_slice::<ErrorReply>(&body).map_or_else(
                |_| ErrorStatus {
                    code: status.as_u16(),
                    message: String::from_utf8_lossy(&body).into_owned(),
                    status: status.canonical_reason().unwrap_or_default().to_owned(),
                },
                |reply| reply.error,
            );
            return Err(EarthEngineError::Api {
                code: if error.code == 0 { status.as_u16() } else { error.code },
                status: error.status,
                message: error.message,
                context: None,
            });
        }

        let reply: ComputeReply = serde_json::from_slice(&body).context("value:compute reply")?;
        Ok(reply.result)
    }
}

impl Drop for EarthEngine {
    fn drop(&mut self) {
        if let Some(task) = self.authenticator.take() {
            task.abort();
        }
    }
}

fn unexpected(what: &str, value: &Value) -> EarthEngineError {
    EarthEngineError::Internal {
        message: format!("unexpected {what} in reply: {value}").into(),
        context: None,
    }
}
