use super::{ApiState, ErrorResponse};
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use fcheck_derive::{api_handler, api_model};
use fcheck_domain::constants::SYSTEM_TAG;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use std::time::Instant;

#[api_model]
/// Liveness report
pub(super) struct HealthResponse {
    /// `up` while the process serves HTTP
    status: String,
    /// Crate version
    version: String,
    /// Uptime in seconds
    uptime: u64,
    /// `true` once every slice can serve requests
    ready: bool,
    /// Readiness per feature slice
    slices: BTreeMap<String, bool>,
}

#[api_model]
/// Readiness report
pub(super) struct ReadyResponse {
    /// Always `ready`
    status: String,
}

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

const NO_STORE: [(header::HeaderName, &str); 2] = [
    (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
    (header::PRAGMA, "no-cache"),
];

#[api_handler(
    get,
    path = "/health",
    responses((status = OK, description = "Liveness and per-slice readiness", body = HealthResponse)),
    tag = SYSTEM_TAG,
)]
pub(super) async fn health_handler(State(state): State<ApiState>) -> impl IntoResponse {
    let body = HealthResponse {
        status: "up".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        uptime: START_TIME.elapsed().as_secs(),
        ready: state.is_ready(),
        slices: state.readiness().map(|(name, ready)| (name.to_owned(), ready)).collect(),
    };

    (NO_STORE, Json(body))
}

#[api_handler(
    get,
    path = "/ready",
    responses(
        (status = OK, description = "All slices can serve requests", body = ReadyResponse),
        (status = SERVICE_UNAVAILABLE, description = "A remote session is not ready yet", body = ErrorResponse),
    ),
    tag = SYSTEM_TAG,
)]
pub(super) async fn ready_handler(State(state): State<ApiState>) -> Response {
    if state.is_ready() {
        (NO_STORE, Json(ReadyResponse { status: "ready".to_owned() })).into_response()
    } else {
        ErrorResponse::new("Service not ready").into_response_with(StatusCode::SERVICE_UNAVAILABLE)
    }
}
