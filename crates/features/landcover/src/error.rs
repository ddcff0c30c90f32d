use std::borrow::Cow;

/// Caller-facing messages. Internal details only reach the logs.
pub const INVALID_COORDINATES: &str = "Invalid coordinates";
pub const SERVICE_NOT_READY: &str = "Service not ready";
pub const PROCESSING_ERROR: &str = "GEE processing error";
pub const SERVER_ERROR: &str = "Server error";

/// Terminal failures of a land-cover check.
#[fcheck_derive::fcheck_error]
pub enum LandCoverError {
    /// The submitted coordinates cannot form a polygon.
    #[error("Invalid geometry{}: {message}", format_context(.context))]
    InvalidGeometry { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The remote session is not authenticated yet (or lost its token).
    #[error("Service not ready{}: {message}", format_context(.context))]
    ServiceNotReady { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The remote service failed, timed out, or replied with something unusable.
    #[error("Remote processing error{}: {message}", format_context(.context))]
    RemoteProcessing { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Land-cover config error{}: {message}", format_context(.context))]
    Config { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal land-cover error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl LandCoverError {
    /// The message a caller sees for this error.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidGeometry { .. } => INVALID_COORDINATES,
            Self::ServiceNotReady { .. } => SERVICE_NOT_READY,
            Self::RemoteProcessing { .. } => PROCESSING_ERROR,
            Self::Config { .. } | Self::Internal { .. } => SERVER_ERROR,
        }
    }
}

#[cfg(feature = "server")]
mod response {
    use super::LandCoverError;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use fcheck_kernel::server::ErrorResponse;

    impl LandCoverError {
        #[must_use]
        pub const fn status(&self) -> StatusCode {
            match self {
                Self::InvalidGeometry { .. } => StatusCode::BAD_REQUEST,
                Self::ServiceNotReady { .. } => StatusCode::SERVICE_UNAVAILABLE,
                Self::RemoteProcessing { .. } | Self::Config { .. } | Self::Internal { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                },
            }
        }
    }

    impl IntoResponse for LandCoverError {
        fn into_response(self) -> Response {
            ErrorResponse::new(self.public_message()).into_response_with(self.status())
        }
    }
}
