//! OAuth2 for Earth Engine: service-account keys and the JWT bearer grant.

use crate::error::{EarthEngineError, EarthEngineErrorExt};
use fcheck_domain::config::CredentialsConfig;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

pub const EARTH_ENGINE_SCOPE: &str = "https://www.googleapis.com/auth/earthengine";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME: Duration = Duration::from_secs(3600);

/// Google service-account key file (the fields this client needs).
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub project_id: Option<String>,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_owned()
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountKey {
    pub fn from_json(json: &str) -> Result<Self, EarthEngineError> {
        serde_json::from_str(json).context("Malformed service-account key")
    }

    pub fn from_file(path: &Path) -> Result<Self, EarthEngineError> {
        let json = std::fs::read_to_string(path).map_err(|e| EarthEngineError::Credentials {
            message: e.to_string().into(),
            context: Some(format!("Failed to read {}", path.display()).into()),
        })?;
        Self::from_json(&json)
    }
}

/// How the client authenticates.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// A pre-issued bearer token. Never refreshed.
    StaticToken(String),
    ServiceAccount(Box<ServiceAccountKey>),
}

impl Credentials {
    /// Resolves credentials from configuration: an explicit token first, then the key file,
    /// then the key JSON in the configured environment variable.
    pub fn resolve(config: &CredentialsConfig) -> Result<Self, EarthEngineError> {
        if let Some(token) = config.access_token.as_deref().filter(|t| !t.trim().is_empty()) {
            return Ok(Self::StaticToken(token.to_owned()));
        }
        if let Some(path) = &config.file {
            return ServiceAccountKey::from_file(path).map(|key| Self::ServiceAccount(Box::new(key)));
        }
        if let Some(var) = &config.env {
            return match std::env::var(var) {
                Ok(json) => {
                    ServiceAccountKey::from_json(&json).map(|key| Self::ServiceAccount(Box::new(key)))
                },
                Err(e) => Err(EarthEngineError::Credentials {
                    message: e.to_string().into(),
                    context: Some(format!("Reading {var}").into()),
                }),
            };
        }

        Err(EarthEngineError::Credentials {
            message: "no access token, key file or key variable configured".into(),
            context: None,
        })
    }

    /// Cloud project named by the key, if any.
    #[must_use]
    pub fn project_id(&self) -> Option<&str> {
        match self {
            Self::StaticToken(_) => None,
            Self::ServiceAccount(key) => key.project_id.as_deref(),
        }
    }
}

/// A bearer token and the instant it stops being accepted.
#[derive(Clone)]
pub(crate) struct AccessToken {
    pub(crate) value: String,
    pub(crate) expires_at: Option<Instant>,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken").field("expires_at", &self.expires_at).finish_non_exhaustive()
    }
}

impl AccessToken {
    pub(crate) fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Deserialize)]
struct TokenReply {
    access_token: String,
    expires_in: u64,
}

#[derive(Deserialize)]
struct TokenErrorReply {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Signs the RS256 assertion for `key`.
pub(crate) fn assertion(key: &ServiceAccountKey) -> Result<String, EarthEngineError> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    let claims = Claims {
        iss: &key.client_email,
        scope: EARTH_ENGINE_SCOPE,
        aud: &key.token_uri,
        iat: now,
        exp: now + ASSERTION_LIFETIME.as_secs(),
    };

    let mut header = Header::new(Algorithm::RS256);
    header.kid.clone_from(&key.private_key_id);

    let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .context("Invalid service-account private key")?;
    jsonwebtoken::encode(&header, &claims, &signing_key).context("Signing token assertion")
}

/// Exchanges a signed assertion for an access token.
pub(crate) async fn fetch_token(
    http: &reqwest::Client,
    key: &ServiceAccountKey,
) -> Result<AccessToken, EarthEngineError> {
    let assertion = assertion(key)?;
    let requested_at = Instant::now();

    let response = http
        .post(&key.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
        .send()
        .await
        .context("Token request")?;

    let status = response.status();
    let body = response.text().await.context("Token reply")?;

    if !status.is_success() {
        let message = serde_json::from_str::<TokenErrorReply>(&body).map_or(body, |reply| {
            match reply.error_description {
                Some(description) => format!("{}: {description}", reply.error),
                None => reply.error,
            }
        });
        return Err(EarthEngineError::Api {
            code: status.as_u16(),
            status: status.canonical_reason().unwrap_or_default().to_owned(),
            message,
            context: Some("Token exchange".into()),
        });
    }

    let reply: TokenReply = serde_json::from_str(&body).context("Token reply")?;
    Ok(AccessToken {
        value: reply.access_token,
        expires_at: Some(requested_at + Duration::from_secs(reply.expires_in)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_JSON: &str = r#"{
        "type": "service_account",
        "project_id": "demo-project",
        "private_key_id": "abc",
        "private_key": "not a key",
        "client_email": "svc@demo-project.iam.gserviceaccount.com"
    }"#;

    #[test]
    fn key_defaults_token_uri() {
        let key = ServiceAccountKey::from_json(KEY_JSON).unwrap();
        assert_eq!(key.token_uri, DEFAULT_TOKEN_URI);
        assert_eq!(key.project_id.as_deref(), Some("demo-project"));
    }

    #[test]
    fn debug_redacts_private_key() {
        let key = ServiceAccountKey::from_json(KEY_JSON).unwrap();
        let debug = format!("{key:?}");
        assert!(!debug.contains("not a key"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn malformed_key_is_a_decode_error() {
        let err = ServiceAccountKey::from_json("{}").unwrap_err();
        assert!(matches!(err, EarthEngineError::Decode { .. }));
    }

    #[test]
    fn invalid_pem_fails_signing() {
        let key = ServiceAccountKey::from_json(KEY_JSON).unwrap();
        let err = assertion(&key).unwrap_err();
        assert!(matches!(err, EarthEngineError::Signing { .. }));
    }

    #[test]
    fn static_token_wins_over_key_sources() {
        let config = CredentialsConfig {
            access_token: Some("ya29.token".to_owned()),
            file: Some("/does/not/exist.json".into()),
            env: None,
        };
        let credentials = Credentials::resolve(&config).unwrap();
        assert!(matches!(credentials, Credentials::StaticToken(ref t) if t == "ya29.token"));
        assert!(credentials.project_id().is_none());
    }

    #[test]
    fn missing_key_file_is_a_credentials_error() {
        let config = CredentialsConfig {
            access_token: None,
            file: Some("/does/not/exist.json".into()),
            env: None,
        };
        let err = Credentials::resolve(&config).unwrap_err();
        assert!(matches!(err, EarthEngineError::Credentials { .. }));
    }

    #[test]
    fn nothing_configured_is_a_credentials_error() {
        let config = CredentialsConfig { access_token: None, file: None, env: None };
        let err = Credentials::resolve(&config).unwrap_err();
        assert!(matches!(err, EarthEngineError::Credentials { .. }));
    }
}
