use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use fcheck_domain::config::{CredentialsConfig, EarthEngineConfig};
use fcheck_domain::geometry::CoordinateRing;
use fcheck_earthengine::{
    Credentials, EarthEngine, EarthEngineError, Polygon, ServiceAccountKey, SessionStatus,
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

const TOKEN: &str = "test-token";
const TEST_KEY: &str = include_str!("fixtures/service_account.pem");

#[derive(Default)]
struct FakeEarthEngine {
    majority: Value,
    area: Value,
    failure: Option<(StatusCode, Value)>,
    token_reply: Option<(StatusCode, Value)>,
    token_calls: AtomicUsize,
    bodies: Mutex<Vec<Value>>,
}

async fn compute(
    State(fake): State<Arc<FakeEarthEngine>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"));
    if !authorized {
        let error = json!({ "error": { "code": 401, "message": "bad token", "status": "UNAUTHENTICATED" } });
        return (StatusCode::UNAUTHORIZED, Json(error)).into_response();
    }

    let is_area = body.to_string().contains("Geometry.area");
    fake.bodies.lock().await.push(body);

    if let Some((status, error)) = &fake.failure {
        return (*status, Json(error.clone())).into_response();
    }
    let result = if is_area { fake.area.clone() } else { fake.majority.clone() };
    Json(json!({ "result": result })).into_response()
}

async fn token(State(fake): State<Arc<FakeEarthEngine>>, form: String) -> Response {
    fake.token_calls.fetch_add(1, Ordering::SeqCst);
    assert!(form.contains("grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer"));
    assert!(form.contains("assertion="));

    match &fake.token_reply {
        Some((status, body)) => (*status, Json(body.clone())).into_response(),
        None => Json(json!({ "access_token": TOKEN, "expires_in": 3600, "token_type": "Bearer" }))
            .into_response(),
    }
}

async fn serve(fake: Arc<FakeEarthEngine>) -> String {
    let router = Router::new()
        .route("/v1/projects/demo/value:compute", post(compute))
        .route("/token", post(token))
        .with_state(fake);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    format!("http://{addr}")
}

fn config(base_url: String) -> EarthEngineConfig {
    EarthEngineConfig {
        base_url,
        project: Some("demo".to_owned()),
        timeout_secs: 5,
        credentials: CredentialsConfig {
            access_token: Some(TOKEN.to_owned()),
            file: None,
            env: None,
        },
        ..EarthEngineConfig::default()
    }
}

fn field() -> Polygon {
    let ring = CoordinateRing::new(vec![[30.0, 50.0], [30.01, 50.0], [30.01, 50.01], [30.0, 50.01]])
        .unwrap();
    Polygon::from_ring(&ring)
}

fn service_account(base_url: &str) -> Credentials {
    let key = ServiceAccountKey::from_json(
        &json!({
            "type": "service_account",
            "project_id": "demo",
            "private_key_id": "k1",
            "private_key": TEST_KEY,
            "client_email": "svc@demo.iam.gserviceaccount.com",
            "token_uri": format!("{base_url}/token"),
        })
        .to_string(),
    )
    .unwrap();
    Credentials::ServiceAccount(Box::new(key))
}

async fn wait_for(engine: &EarthEngine, status: SessionStatus) {
    for _ in 0..100 {
        if engine.session().status() == status {
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("session never reached {status:?}, stuck at {:?}", engine.session().status());
}

#[tokio::test]
async fn majority_value_is_read_from_the_band() {
    let fake = Arc::new(FakeEarthEngine { majority: json!(40), ..Default::default() });
    let engine = EarthEngine::connect(&config(serve(fake.clone()).await)).unwrap();

    assert!(engine.is_ready());
    assert_eq!(engine.majority_value(&field()).await.unwrap(), Some(40.0));

    let bodies = fake.bodies.lock().await;
    let sent = bodies[0].to_string();
    assert!(sent.contains("Reducer.mode"));
    assert!(sent.contains("ESA/WorldCover/v100/2020"));
    assert!(sent.contains("\"bandSelectors\":{\"constantValue\":[\"Map\"]}"));
}

#[tokio::test]
async fn empty_region_yields_no_class() {
    let fake = Arc::new(FakeEarthEngine { majority: Value::Null, ..Default::default() });
    let engine = EarthEngine::connect(&config(serve(fake).await)).unwrap();

    assert_eq!(engine.majority_value(&field()).await.unwrap(), None);
}

#[tokio::test]
async fn area_is_returned_in_square_meters() {
    let fake = Arc::new(FakeEarthEngine { area: json!(1234.5), ..Default::default() });
    let engine = EarthEngine::connect(&config(serve(fake).await)).unwrap();

    let area = engine.area(&field()).await.unwrap();
    assert!((area - 1234.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn service_errors_are_surfaced() {
    let fake = Arc::new(FakeEarthEngine {
        failure: Some((
            StatusCode::BAD_REQUEST,
            json!({ "error": { "code": 400, "message": "Too many pixels", "status": "INVALID_ARGUMENT" } }),
        )),
        ..Default::default()
    });
    let engine = EarthEngine::connect(&config(serve(fake).await)).unwrap();

    let err = engine.majority_value(&field()).await.unwrap_err();
    match err {
        EarthEngineError::Api { code, status, message, .. } => {
            assert_eq!(code, 400);
            assert_eq!(status, "INVALID_ARGUMENT");
            assert_eq!(message, "Too many pixels");
        },
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn rejected_token_is_an_api_error() {
    let fake = Arc::new(FakeEarthEngine::default());
    let mut config = config(serve(fake).await);
    config.credentials.access_token = Some("stale".to_owned());
    let engine = EarthEngine::connect(&config).unwrap();

    let err = engine.area(&field()).await.unwrap_err();
    assert!(matches!(err, EarthEngineError::Api { code: 401, .. }));
}

#[tokio::test]
async fn service_account_session_becomes_ready() {
    let fake = Arc::new(FakeEarthEngine { majority: json!(10), ..Default::default() });
    let base_url = serve(fake.clone()).await;
    let engine =
        EarthEngine::with_credentials(&config(base_url.clone()), service_account(&base_url)).unwrap();

    wait_for(&engine, SessionStatus::Ready).await;
    assert_eq!(fake.token_calls.load(Ordering::SeqCst), 1);
    assert_eq!(engine.majority_value(&field()).await.unwrap(), Some(10.0));
}

#[tokio::test]
async fn refused_grant_leaves_the_session_failed() {
    let fake = Arc::new(FakeEarthEngine {
        token_reply: Some((
            StatusCode::BAD_REQUEST,
            json!({ "error": "invalid_grant", "error_description": "Invalid JWT Signature." }),
        )),
        ..Default::default()
    });
    let base_url = serve(fake).await;
    let engine =
        EarthEngine::with_credentials(&config(base_url.clone()), service_account(&base_url)).unwrap();

    wait_for(&engine, SessionStatus::Failed).await;
    assert!(!engine.is_ready());

    let err = engine.majority_value(&field()).await.unwrap_err();
    assert!(err.is_not_ready());
    assert!(err.to_string().contains("invalid_grant"));
}

#[tokio::test]
async fn project_is_required() {
    let mut config = config("http://127.0.0.1:9".to_owned());
    config.project = None;

    let err = EarthEngine::connect(&config).unwrap_err();
    assert!(matches!(err, EarthEngineError::Credentials { .. }));
}
