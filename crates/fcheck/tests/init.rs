use fcheck::domain::config::ApiConfig;
use fcheck::features::landcover::LandCover;
use fcheck::{InitError, connect, features, init};
use std::any::TypeId;

fn static_token_config() -> ApiConfig {
    let mut config = ApiConfig::default();
    config.earth_engine.project = Some("demo".to_owned());
    config.earth_engine.credentials.access_token = Some("token".to_owned());
    config
}

#[tokio::test]
async fn init_registers_landcover() {
    let config = static_token_config();
    let engine = connect(&config).unwrap();

    let slices = init(&config, engine).unwrap();

    assert_eq!(slices.len(), 1);
    assert_eq!(slices[0].id, TypeId::of::<LandCover>());
    assert!(slices[0].state.is_ready());
}

#[tokio::test]
async fn missing_credentials_fail_to_connect() {
    let mut config = ApiConfig::default();
    config.earth_engine.project = Some("demo".to_owned());
    config.earth_engine.credentials.env = None;

    let err = connect(&config).unwrap_err();
    assert!(matches!(err, InitError::EarthEngine { .. }));
    assert!(err.to_string().contains("Connecting to Earth Engine"));
}

#[test]
fn landcover_is_always_enabled() {
    assert!(features::is_enabled("landcover"));
    assert!(!features::is_enabled("billing"));
}
