//! Authentication lifecycle of the client.
//!
//! A session starts `Pending`, becomes `Ready` once a token is obtained and is kept fresh by a
//! background task. A failed refresh leaves a still-valid token in place.

use crate::auth::{AccessToken, ServiceAccountKey, fetch_token};
use crate::error::EarthEngineError;
use parking_lot::RwLock;
use std::borrow::Cow;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Renew this long before the token expires.
const REFRESH_MARGIN: Duration = Duration::from_secs(300);
/// Lower bound between two token requests.
const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(30);
/// Wait after a failed token request.
pub(crate) const RETRY_AFTER: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
enum SessionState {
    Pending,
    Ready(AccessToken),
    Failed(Cow<'static, str>),
}

/// Snapshot of the session for health reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Pending,
    Ready,
    Expired,
    Failed,
}

/// Shared handle to the current access token.
#[derive(Debug, Clone)]
pub struct Session {
    state: Arc<RwLock<SessionState>>,
}

impl Session {
    /// A session waiting for its first token.
    #[must_use]
    pub fn pending() -> Self {
        Self { state: Arc::new(RwLock::new(SessionState::Pending)) }
    }

    /// A session that is ready at once with a token that never expires.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        let token = AccessToken { value: token.into(), expires_at: None };
        Self { state: Arc::new(RwLock::new(SessionState::Ready(token))) }
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        match &*self.state.read() {
            SessionState::Pending => SessionStatus::Pending,
            SessionState::Ready(token) if token.is_expired() => SessionStatus::Expired,
            SessionState::Ready(_) => SessionStatus::Ready,
            SessionState::Failed(_) => SessionStatus::Failed,
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status() == SessionStatus::Ready
    }

    /// The current bearer token.
    ///
    /// # Errors
    /// [`EarthEngineError::NotReady`] while pending, after a failed authentication, or once the
    /// token has expired.
    pub fn bearer(&self) -> Result<String, EarthEngineError> {
        let message: Cow<'static, str> = match &*self.state.read() {
            SessionState::Ready(token) if !token.is_expired() => return Ok(token.value.clone()),
            SessionState::Ready(_) => "access token expired".into(),
            SessionState::Pending => "authentication in progress".into(),
            SessionState::Failed(reason) => reason.clone(),
        };
        Err(EarthEngineError::NotReady { message, context: None })
    }

    pub(crate) fn set_token(&self, token: AccessToken) {
        *self.state.write() = SessionState::Ready(token);
    }

    /// Records a failure unless a usable token is still held.
    pub(crate) fn set_failed(&self, reason: impl Into<Cow<'static, str>>) {
        let mut state = self.state.write();
        if !matches!(&*state, SessionState::Ready(token) if !token.is_expired()) {
            *state = SessionState::Failed(reason.into());
        }
    }
}

/// Time to sleep before renewing a token issued now.
fn refresh_delay(token: &AccessToken) -> Duration {
    token.expires_at.map_or(Duration::MAX, |at| {
        at.saturating_duration_since(Instant::now())
            .saturating_sub(REFRESH_MARGIN)
            .max(MIN_REFRESH_INTERVAL)
    })
}

/// Obtains and renews service-account tokens for `session` until aborted.
pub(crate) fn spawn_authenticator(
    session: Session,
    http: reqwest::Client,
    key: ServiceAccountKey,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let wait = match fetch_token(&http, &key).await {
                Ok(token) => {
                    let wait = refresh_delay(&token);
                    session.set_token(token);
                    tracing::info!(
                        account = %key.client_email,
                        refresh_in_secs = wait.as_secs(),
                        "Earth Engine session authenticated"
                    );
                    wait
                },
                Err(e) => {
                    tracing::error!(
                        account = %key.client_email,
                        error = %e,
                        retry_in_secs = RETRY_AFTER.as_secs(),
                        "Earth Engine authentication failed"
                    );
                    session.set_failed(e.to_string());
                    RETRY_AFTER
                },
            };
            if wait == Duration::MAX {
                break;
            }
            tokio::time::sleep(wait).await;
        }
    })
}
