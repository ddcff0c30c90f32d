use std::borrow::Cow;

/// Errors raised by the Earth Engine client.
#[fcheck_derive::fcheck_error]
pub enum EarthEngineError {
    /// Transport failure (connect, TLS, timeout, body read).
    #[error("HTTP error{}: {source}", format_context(.context))]
    Http { source: reqwest::Error, context: Option<Cow<'static, str>> },

    /// The service answered with an error payload.
    #[error("Earth Engine error {code} {status}{}: {message}", format_context(.context))]
    Api { code: u16, status: String, message: String, context: Option<Cow<'static, str>> },

    /// The reply could not be decoded.
    #[error("Decode error{}: {source}", format_context(.context))]
    Decode { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// Missing or malformed service-account credentials.
    #[error("Credentials error{}: {message}", format_context(.context))]
    Credentials { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The token assertion could not be signed.
    #[error("Token signing error{}: {source}", format_context(.context))]
    Signing { source: jsonwebtoken::errors::Error, context: Option<Cow<'static, str>> },

    /// The session has no usable access token (still authenticating, failed, or expired).
    #[error("Session not ready{}: {message}", format_context(.context))]
    NotReady { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal Earth Engine client error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl EarthEngineError {
    /// `true` when the failure is the session lifecycle rather than the service.
    #[must_use]
    pub const fn is_not_ready(&self) -> bool {
        matches!(self, Self::NotReady { .. })
    }
}
