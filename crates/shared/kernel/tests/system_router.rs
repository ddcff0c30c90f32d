#![cfg(feature = "server")]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use fcheck_domain::config::ApiConfig;
use fcheck_domain::registry::{FeatureSlice, InitializedSlice};
use fcheck_kernel::server::ApiState;
use fcheck_kernel::server::router::system_router;
use std::any::Any;
use tower::ServiceExt;

#[derive(Debug)]
struct Gate(bool);

impl FeatureSlice for Gate {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> &'static str {
        "gate"
    }

    fn is_ready(&self) -> bool {
        self.0
    }
}

fn app(ready: bool) -> axum::Router {
    let state = ApiState::builder()
        .config(ApiConfig::default())
        .register_slice(InitializedSlice::new(Gate(ready)))
        .build()
        .unwrap();
    let (router, _) = system_router().with_state(state).split_for_parts();
    router
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response =
        app.oneshot(Request::get(uri).body(Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_reports_slice_readiness() {
    let (status, body) = get(app(false), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "up");
    assert_eq!(body["ready"], false);
    assert_eq!(body["slices"]["gate"], false);
}

#[tokio::test]
async fn ready_is_unavailable_until_slices_are_ready() {
    let (status, body) = get(app(false), "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Service not ready");

    let (status, body) = get(app(true), "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[test]
fn missing_slice_is_reported() {
    let state = ApiState::builder().config(ApiConfig::default()).build().unwrap();
    assert!(state.get_slice::<Gate>().is_none());
    assert!(state.try_get_slice::<Gate>().is_err());
    assert!(state.is_ready());
}
